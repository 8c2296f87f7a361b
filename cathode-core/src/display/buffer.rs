//! Segment intensity buffers and the active-stream binding
//!
//! A [`SegmentBuffer`] holds one intensity byte per driver line. The cells
//! are 8-bit atomics because the buffer currently bound to the refresh
//! engine is read from the tick interrupt while the application writes it;
//! single-byte updates land whole, and a multi-byte clear may tear for at
//! most one frame, which is acceptable.

use portable_atomic::{AtomicU8, AtomicUsize, Ordering};

use super::layout::{segments_in_digit, DIGIT_OFFSET, SEGMENTS};

/// Intensity data for all 64 driver lines
pub struct SegmentBuffer {
    cells: [AtomicU8; SEGMENTS],
}

impl SegmentBuffer {
    /// Create a buffer with every segment off
    pub const fn new() -> Self {
        Self {
            cells: [const { AtomicU8::new(0) }; SEGMENTS],
        }
    }

    /// Intensity of one driver line
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.cells[index].load(Ordering::Relaxed)
    }

    /// Set the intensity of one driver line
    #[inline]
    pub fn set(&self, index: usize, intensity: u8) {
        self.cells[index].store(intensity, Ordering::Relaxed);
    }

    /// Turn every segment off
    pub fn clear(&self) {
        for cell in &self.cells {
            cell.store(0, Ordering::Relaxed);
        }
    }

    /// Turn off all segments of one digit position
    ///
    /// Tubes clear all ten cathodes; lamp/aux pseudo-digits clear their
    /// single line.
    pub fn clear_digit(&self, digit: u8) {
        let base = DIGIT_OFFSET[digit as usize] as usize;
        for index in base..base + segments_in_digit(digit) {
            self.cells[index].store(0, Ordering::Relaxed);
        }
    }

    /// Set one segment of one digit position
    pub fn set_segment(&self, digit: u8, segment: u8, intensity: u8) {
        let index = DIGIT_OFFSET[digit as usize] as usize + segment as usize;
        self.cells[index].store(intensity, Ordering::Relaxed);
    }

    /// Intensity of one segment of one digit position
    pub fn segment(&self, digit: u8, segment: u8) -> u8 {
        let index = DIGIT_OFFSET[digit as usize] as usize + segment as usize;
        self.cells[index].load(Ordering::Relaxed)
    }

    /// Copy the current intensities out
    pub fn snapshot(&self) -> [u8; SEGMENTS] {
        let mut out = [0u8; SEGMENTS];
        for (slot, cell) in out.iter_mut().zip(&self.cells) {
            *slot = cell.load(Ordering::Relaxed);
        }
        out
    }
}

impl Default for SegmentBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed pool of segment buffers plus the active binding
///
/// Exactly one buffer is bound to the refresh engine at any time; the
/// binding swap is a single atomic store, so the engine never observes a
/// half-switched state.
pub struct DisplayBank<const N: usize> {
    buffers: [SegmentBuffer; N],
    active: AtomicUsize,
}

impl<const N: usize> DisplayBank<N> {
    /// Create a bank with all buffers cleared and buffer 0 active
    pub const fn new() -> Self {
        Self {
            buffers: [const { SegmentBuffer::new() }; N],
            active: AtomicUsize::new(0),
        }
    }

    /// One buffer of the pool
    pub fn buffer(&self, index: usize) -> &SegmentBuffer {
        &self.buffers[index]
    }

    /// Bind a buffer to the refresh engine
    pub fn show(&self, index: usize) {
        debug_assert!(index < N);
        self.active.store(index, Ordering::Release);
    }

    /// The buffer currently bound to the refresh engine
    pub fn active(&self) -> &SegmentBuffer {
        &self.buffers[self.active.load(Ordering::Acquire)]
    }

    /// Index of the active buffer
    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

impl<const N: usize> Default for DisplayBank<N> {
    fn default() -> Self {
        Self::new()
    }
}
