//! Display refresh engine
//!
//! One call per tick performs one PWM sub-cycle: a segment is lit during
//! sub-cycle `s` iff its intensity is greater than `s`, so an intensity of
//! [`MAX_INTENSITY`] is on for the whole cycle and 0 never lights. A full
//! PWM cycle is `MAX_INTENSITY` sub-cycles, which at 625 Hz gives a ~69 Hz
//! full-display rate, comfortably above the 30 Hz flicker floor.
//!
//! The `one_cycle_only` / `one_cycle_done` flags let the crossfade engine
//! park the refresh at a PWM cycle boundary so its intensity adjustments
//! are never observed mid-cycle.

use cathode_hal::display::{DisplayBus, FRAME_BYTES};
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use super::buffer::SegmentBuffer;
use super::layout::{MAX_CROSSFADE_RATE, MAX_INTENSITY, SEGMENTS};

/// Refresh mode flags, shared between the tick interrupt and the
/// application (crossfade) context
pub struct RefreshControl {
    refresh_enable: AtomicBool,
    one_cycle_only: AtomicBool,
    one_cycle_done: AtomicBool,
    crossfade_rate: AtomicU8,
}

impl RefreshControl {
    /// Flags at reset: refresh running, no cycle synchronization pending
    pub const fn new() -> Self {
        Self {
            refresh_enable: AtomicBool::new(true),
            one_cycle_only: AtomicBool::new(false),
            one_cycle_done: AtomicBool::new(false),
            crossfade_rate: AtomicU8::new(0),
        }
    }

    /// Whether the engine will run on the next tick
    pub fn is_enabled(&self) -> bool {
        self.refresh_enable.load(Ordering::Acquire)
    }

    /// Resume refresh for (at least) the next PWM cycle
    pub fn resume(&self) {
        self.refresh_enable.store(true, Ordering::Release);
    }

    /// Suspend refresh immediately
    pub fn suspend(&self) {
        self.refresh_enable.store(false, Ordering::Release);
    }

    /// Arm single-cycle mode: the engine stops after the next full PWM
    /// cycle and raises `one_cycle_done`
    pub fn arm_single_cycle(&self) {
        self.one_cycle_done.store(false, Ordering::Release);
        self.one_cycle_only.store(true, Ordering::Release);
    }

    /// Leave single-cycle mode and let refresh free-run
    pub fn disarm_single_cycle(&self) {
        self.one_cycle_only.store(false, Ordering::Release);
        self.refresh_enable.store(true, Ordering::Release);
    }

    /// Consume the cycle-complete flag
    pub fn take_cycle_done(&self) -> bool {
        self.one_cycle_done.swap(false, Ordering::AcqRel)
    }

    /// Set the crossfade rate, clamped to 0..=[`MAX_CROSSFADE_RATE`]
    /// (0 is fastest)
    pub fn set_crossfade_rate(&self, rate: u8) {
        self.crossfade_rate
            .store(rate.min(MAX_CROSSFADE_RATE), Ordering::Release);
    }

    /// Current crossfade rate
    pub fn crossfade_rate(&self) -> u8 {
        self.crossfade_rate.load(Ordering::Acquire)
    }
}

impl Default for RefreshControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Enable or disable the display
///
/// Disabling suspends refresh and blanks the driver via its output-enable
/// line; enabling also clears any pending single-cycle mode.
pub fn set_display_enabled<B: DisplayBus>(ctrl: &RefreshControl, bus: &mut B, enabled: bool) {
    if enabled {
        ctrl.disarm_single_cycle();
        bus.set_output_enable(true);
    } else {
        ctrl.suspend();
        bus.set_output_enable(false);
    }
}

/// The per-tick PWM engine
///
/// Owned by the tick context; everything shared lives in
/// [`RefreshControl`] and the segment buffer.
pub struct RefreshEngine {
    subcycle: u8,
}

impl RefreshEngine {
    pub const fn new() -> Self {
        Self { subcycle: 0 }
    }

    /// Perform one PWM sub-cycle
    ///
    /// Builds the 64-bit on/off frame from the buffer, shifts it to the
    /// driver and latches it. Returns immediately when refresh is
    /// disabled.
    pub fn step<B: DisplayBus>(
        &mut self,
        ctrl: &RefreshControl,
        buf: &SegmentBuffer,
        bus: &mut B,
    ) -> Result<(), B::Error> {
        if !ctrl.is_enabled() {
            return Ok(());
        }

        let mut frame = [0u8; FRAME_BYTES];
        for index in 0..SEGMENTS {
            if buf.get(index) > self.subcycle {
                // Bit i of the stream is segment i, MSb shifted first
                frame[index / 8] |= 0x80 >> (index % 8);
            }
        }
        bus.shift_frame(&frame)?;

        self.subcycle += 1;
        if self.subcycle >= MAX_INTENSITY {
            self.subcycle = 0;
            ctrl.one_cycle_done.store(true, Ordering::Release);

            // Suspend at the cycle boundary when the crossfade engine has
            // asked for single-cycle operation
            if ctrl.one_cycle_only.load(Ordering::Acquire) {
                ctrl.refresh_enable.store(false, Ordering::Release);
            }
        }

        Ok(())
    }
}

impl Default for RefreshEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_bus {
    use cathode_hal::display::{DisplayBus, FRAME_BYTES};
    use core::convert::Infallible;

    /// Recording driver-bus double: captures every latched frame and the
    /// output-enable history
    pub struct RecordingBus {
        pub frames: std::vec::Vec<[u8; FRAME_BYTES]>,
        pub enable_history: std::vec::Vec<bool>,
    }

    impl RecordingBus {
        pub fn new() -> Self {
            Self {
                frames: std::vec::Vec::new(),
                enable_history: std::vec::Vec::new(),
            }
        }

        /// Segment indices lit in the most recent frame
        pub fn lit(&self) -> std::vec::Vec<usize> {
            let frame = self.frames.last().expect("no frame shifted");
            (0..64)
                .filter(|&i| frame[i / 8] & (0x80 >> (i % 8)) != 0)
                .collect()
        }
    }

    impl DisplayBus for RecordingBus {
        type Error = Infallible;

        fn shift_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), Infallible> {
            self.frames.push(*frame);
            Ok(())
        }

        fn set_output_enable(&mut self, enabled: bool) {
            self.enable_history.push(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::test_bus::RecordingBus;
    use super::*;

    #[test]
    fn test_lit_set_matches_intensity_threshold() {
        let buf = SegmentBuffer::new();
        buf.set(0, 9);
        buf.set(5, 1);
        buf.set(63, 4);

        let ctrl = RefreshControl::new();
        let mut engine = RefreshEngine::new();
        let mut bus = RecordingBus::new();

        for subcycle in 0..MAX_INTENSITY {
            engine.step(&ctrl, &buf, &mut bus).unwrap();
            let expected: std::vec::Vec<usize> =
                (0..SEGMENTS).filter(|&i| buf.get(i) > subcycle).collect();
            assert_eq!(bus.lit(), expected, "sub-cycle {}", subcycle);
        }
        assert_eq!(bus.frames.len(), MAX_INTENSITY as usize);
    }

    #[test]
    fn test_disabled_engine_is_a_no_op() {
        let buf = SegmentBuffer::new();
        let ctrl = RefreshControl::new();
        ctrl.suspend();

        let mut engine = RefreshEngine::new();
        let mut bus = RecordingBus::new();
        engine.step(&ctrl, &buf, &mut bus).unwrap();
        assert!(bus.frames.is_empty());
    }

    #[test]
    fn test_single_cycle_mode_parks_at_boundary() {
        let buf = SegmentBuffer::new();
        let ctrl = RefreshControl::new();
        let mut engine = RefreshEngine::new();
        let mut bus = RecordingBus::new();

        ctrl.arm_single_cycle();
        for _ in 0..MAX_INTENSITY {
            assert!(!ctrl.take_cycle_done());
            engine.step(&ctrl, &buf, &mut bus).unwrap();
        }

        assert!(ctrl.take_cycle_done());
        assert!(!ctrl.is_enabled());
        assert_eq!(bus.frames.len(), MAX_INTENSITY as usize);

        // Parked: further ticks emit nothing until refresh resumes
        engine.step(&ctrl, &buf, &mut bus).unwrap();
        assert_eq!(bus.frames.len(), MAX_INTENSITY as usize);

        ctrl.disarm_single_cycle();
        engine.step(&ctrl, &buf, &mut bus).unwrap();
        assert_eq!(bus.frames.len(), MAX_INTENSITY as usize + 1);
    }

    #[test]
    fn test_crossfade_rate_is_clamped() {
        let ctrl = RefreshControl::new();
        ctrl.set_crossfade_rate(7);
        assert_eq!(ctrl.crossfade_rate(), MAX_CROSSFADE_RATE);
        ctrl.set_crossfade_rate(2);
        assert_eq!(ctrl.crossfade_rate(), 2);
    }

    #[test]
    fn test_display_enable_drives_output_enable() {
        let ctrl = RefreshControl::new();
        let mut bus = RecordingBus::new();

        set_display_enabled(&ctrl, &mut bus, false);
        assert!(!ctrl.is_enabled());
        set_display_enabled(&ctrl, &mut bus, true);
        assert!(ctrl.is_enabled());
        assert_eq!(bus.enable_history, std::vec![false, true]);
    }
}
