//! Serial byte I/O rings
//!
//! Fixed-size transmit and receive rings with per-direction blocking
//! policy and an opt-in CR/LF expansion on the formatted output path.
//! The rings are plain data: the board crate bridges them to the UART
//! (interrupt-driven pump or polled fallback) and wraps the port in its
//! critical-section primitive, so the same semantics hold either way.

use core::fmt;

use heapless::Deque;

use crate::config::{SERIAL_RX_LEN, SERIAL_TX_LEN};

/// Byte ring buffer
pub struct ByteQueue<const N: usize> {
    inner: Deque<u8, N>,
}

impl<const N: usize> ByteQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Deque::new(),
        }
    }

    /// Append a byte; `false` when the ring is full (byte discarded)
    pub fn push(&mut self, byte: u8) -> bool {
        self.inner.push_back(byte).is_ok()
    }

    /// Remove and return the oldest byte
    pub fn pop(&mut self) -> Option<u8> {
        self.inner.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Bytes queued
    pub fn used(&self) -> usize {
        self.inner.len()
    }

    /// Space left
    pub fn free(&self) -> usize {
        N - self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// What became of a non-blocking write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    /// Byte queued for transmission
    Queued,
    /// Ring full and blocking enabled: the caller should wait for the
    /// pump to drain a slot and retry
    WouldBlock,
    /// Ring full and blocking disabled: byte discarded
    Dropped,
}

/// Buffered serial port
///
/// Application side: [`write`](SerialPort::write) /
/// [`read`](SerialPort::read) and the [`fmt::Write`] adapter.
/// Pump side (UART interrupt or polled bridge):
/// [`pop_tx`](SerialPort::pop_tx) / [`push_rx`](SerialPort::push_rx).
pub struct SerialPort {
    tx: ByteQueue<SERIAL_TX_LEN>,
    rx: ByteQueue<SERIAL_RX_LEN>,
    tx_blocking: bool,
    rx_blocking: bool,
    auto_crlf: bool,
    /// Receive bytes lost to a full ring
    rx_overruns: u8,
}

impl SerialPort {
    /// Both directions blocking, CR/LF expansion off
    pub const fn new() -> Self {
        Self {
            tx: ByteQueue::new(),
            rx: ByteQueue::new(),
            tx_blocking: true,
            rx_blocking: true,
            auto_crlf: false,
            rx_overruns: 0,
        }
    }

    /// Control whether a full transmit ring asks the caller to wait
    /// (`true`) or discards the byte (`false`)
    pub fn set_tx_blocking(&mut self, blocking: bool) {
        self.tx_blocking = blocking;
    }

    /// Control whether an empty receive ring asks the caller to wait
    pub fn set_rx_blocking(&mut self, blocking: bool) {
        self.rx_blocking = blocking;
    }

    pub fn rx_blocking(&self) -> bool {
        self.rx_blocking
    }

    /// Expand `\n` to `\r\n` on the formatted output path
    pub fn set_auto_crlf(&mut self, enabled: bool) {
        self.auto_crlf = enabled;
    }

    /// Queue one byte for transmission
    pub fn write(&mut self, byte: u8) -> WriteOutcome {
        if self.tx.push(byte) {
            WriteOutcome::Queued
        } else if self.tx_blocking {
            WriteOutcome::WouldBlock
        } else {
            WriteOutcome::Dropped
        }
    }

    /// Take one received byte, `None` when the ring is empty
    pub fn read(&mut self) -> Option<u8> {
        self.rx.pop()
    }

    /// Pump side: next byte to put on the wire
    pub fn pop_tx(&mut self) -> Option<u8> {
        self.tx.pop()
    }

    /// Pump side: byte arrived from the wire
    ///
    /// A full ring drops the byte and counts an overrun.
    pub fn push_rx(&mut self, byte: u8) {
        if !self.rx.push(byte) {
            self.rx_overruns = self.rx_overruns.saturating_add(1);
        }
    }

    /// Receive bytes dropped since the last call
    pub fn take_rx_overruns(&mut self) -> u8 {
        core::mem::take(&mut self.rx_overruns)
    }

    pub fn tx_used(&self) -> usize {
        self.tx.used()
    }

    pub fn tx_free(&self) -> usize {
        self.tx.free()
    }

    /// Whether everything queued has been handed to the pump
    pub fn tx_idle(&self) -> bool {
        self.tx.is_empty()
    }

    pub fn rx_used(&self) -> usize {
        self.rx.used()
    }

    pub fn rx_free(&self) -> usize {
        self.rx.free()
    }

    pub fn rx_has_data(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Formatted-output adapter honoring the CR/LF setting
    ///
    /// Bytes that do not fit are dropped; callers that must not lose
    /// output should drain the port (or size the ring) accordingly.
    pub fn writer(&mut self) -> SerialWriter<'_> {
        SerialWriter { port: self }
    }
}

impl Default for SerialPort {
    fn default() -> Self {
        Self::new()
    }
}

/// `fmt::Write` adapter over a [`SerialPort`]
pub struct SerialWriter<'a> {
    port: &'a mut SerialPort,
}

impl fmt::Write for SerialWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' && self.port.auto_crlf {
                let _ = self.port.write(b'\r');
            }
            let _ = self.port.write(byte);
        }
        Ok(())
    }
}
