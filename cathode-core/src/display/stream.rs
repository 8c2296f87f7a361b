//! Virtual display streams
//!
//! A stream turns a byte stream into segment intensities, terminal-style:
//! displayable characters light cathodes at the cursor, control characters
//! move the cursor, change intensity, drive the neon lamps and aux
//! outputs, or switch overlay/wrap modes. Unrecognized bytes are ignored,
//! so the stream never desynchronizes.
//!
//! Character reference:
//!
//! ```text
//! 0..9        light segment n at the cursor, advance
//! A..I a..i   light segment 0 AND segment 1..9 at the cursor, advance
//! <space>     clear all segments at the cursor, advance
//! < > ( ) `   left/right neon lamp on, off, both off
//! . ,         lamp adjacent to the cursor (left / right side)
//! X x Y y     aux output A/B on/off
//! [ ] *n ~    intensity -1, +1, =n, nominal
//! $ # !       cursor auto-advance on, off, off for next glyph
//! & | _ ^     overlay off, on, next glyph only, cursor left + next glyph
//! @n { }      cursor to n, wrap off, wrap on
//! \f \r \n    clear+home, home, clear
//! \b \t \v    cursor left, cursor right, partial reset
//! ```
//!
//! Streams implement [`core::fmt::Write`], so `write!` with the usual
//! format machinery is the way the application renders time and date onto
//! the tubes.

use core::fmt;

use super::buffer::SegmentBuffer;
use super::layout::{
    AUX_A, AUX_B, LEFT_LAMP, MAX_INTENSITY, NOMINAL_INTENSITY, RIGHT_LAMP, WIDTH,
};

/// Parser state: how the next byte is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ParamState {
    /// Interpret bytes normally
    Normal,
    /// Next byte is the `*` intensity parameter
    SetIntensity,
    /// Next byte is the `@` cursor parameter
    SetCursor,
}

/// Stream control flags as a packed bitset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ControlFlags(u8);

impl ControlFlags {
    const NO_CURSOR_INC: u8 = 1 << 0;
    const SINGLE_NO_INC: u8 = 1 << 1;
    const OVERLAY: u8 = 1 << 2;
    const SINGLE_OVERLAY: u8 = 1 << 3;
    const NO_CURSOR_WRAP: u8 = 1 << 4;

    fn get(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    fn put(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    fn clear_all(&mut self) {
        self.0 = 0;
    }
}

/// What a displayable byte does at the cursor
enum Glyph {
    /// One cathode: `0`..`9`
    Digit(u8),
    /// Cathode 0 plus cathode 1..9: `A`..`I`
    Paired(u8),
    /// All cathodes off: space
    Blank,
}

/// A virtual display: cursor/intensity state over a segment buffer
///
/// Several streams can exist at once, each with its own buffer; the
/// refresh engine renders whichever buffer is bound active.
pub struct DisplayStream<'b> {
    buf: &'b SegmentBuffer,
    cursor: u8,
    intensity: u8,
    state: ParamState,
    flags: ControlFlags,
}

impl<'b> DisplayStream<'b> {
    /// Create a stream over `buf`, clearing it
    ///
    /// Cursor at the leftmost tube, nominal intensity, all modes off.
    pub fn new(buf: &'b SegmentBuffer) -> Self {
        buf.clear();
        Self {
            buf,
            cursor: 0,
            intensity: MAX_INTENSITY,
            state: ParamState::Normal,
            flags: ControlFlags::default(),
        }
    }

    /// The segment buffer behind this stream
    pub fn buffer(&self) -> &'b SegmentBuffer {
        self.buf
    }

    /// Current cursor position (0..=[`WIDTH`]; `WIDTH` is past-the-end)
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Current output intensity
    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Process one byte of the stream
    pub fn write_byte(&mut self, ch: u8) {
        // A pending `*` or `@` consumes this byte as its parameter; an
        // out-of-range parameter leaves the prior value untouched.
        match self.state {
            ParamState::SetIntensity => {
                let value = ch.wrapping_sub(b'0');
                if value <= MAX_INTENSITY {
                    self.intensity = value;
                }
                self.state = ParamState::Normal;
                return;
            }
            ParamState::SetCursor => {
                let value = ch.wrapping_sub(b'0');
                if value <= WIDTH {
                    self.cursor = value;
                }
                self.state = ParamState::Normal;
                return;
            }
            ParamState::Normal => {}
        }

        let glyph = match ch {
            b'0'..=b'9' => Some(Glyph::Digit(ch - b'0')),
            b'A'..=b'I' => Some(Glyph::Paired(ch - b'A' + 1)),
            b'a'..=b'i' => Some(Glyph::Paired(ch - b'a' + 1)),
            b' ' => Some(Glyph::Blank),
            _ => None,
        };

        if let Some(glyph) = glyph {
            // Past-the-end cursor (no-wrap mode): the write is dropped but
            // cursor bookkeeping still runs
            if self.cursor < WIDTH {
                let overlay = self.flags.get(ControlFlags::OVERLAY)
                    || self.flags.get(ControlFlags::SINGLE_OVERLAY);
                if !overlay {
                    self.buf.clear_digit(self.cursor);
                }
                match glyph {
                    Glyph::Digit(seg) => self.buf.set_segment(self.cursor, seg, self.intensity),
                    Glyph::Paired(seg) => {
                        self.buf.set_segment(self.cursor, 0, self.intensity);
                        self.buf.set_segment(self.cursor, seg, self.intensity);
                    }
                    Glyph::Blank => {}
                }
            }

            self.advance_cursor(true);
            self.flags.put(ControlFlags::SINGLE_OVERLAY, false);
            return;
        }

        match ch {
            b'<' => self.buf.set_segment(LEFT_LAMP, 0, self.intensity),
            b'>' => self.buf.set_segment(RIGHT_LAMP, 0, self.intensity),
            b'(' => self.buf.set_segment(LEFT_LAMP, 0, 0),
            b')' => self.buf.set_segment(RIGHT_LAMP, 0, 0),
            b'`' => {
                self.buf.set_segment(LEFT_LAMP, 0, 0);
                self.buf.set_segment(RIGHT_LAMP, 0, 0);
            }

            // Lamp to the left of the cursor: only positions adjacent to a
            // lamp on their left side qualify
            b'.' => {
                if self.cursor == 2 || self.cursor == 3 {
                    self.buf.set_segment(LEFT_LAMP, 0, self.intensity);
                } else if self.cursor > 3 {
                    self.buf.set_segment(RIGHT_LAMP, 0, self.intensity);
                }
            }

            // Lamp to the right of the cursor
            b',' => {
                if self.cursor == 0 || self.cursor == 1 {
                    self.buf.set_segment(LEFT_LAMP, 0, self.intensity);
                } else if self.cursor < 4 {
                    self.buf.set_segment(RIGHT_LAMP, 0, self.intensity);
                }
            }

            b'X' => self.buf.set_segment(AUX_A, 0, self.intensity),
            b'x' => self.buf.set_segment(AUX_A, 0, 0),
            b'Y' => self.buf.set_segment(AUX_B, 0, self.intensity),
            b'y' => self.buf.set_segment(AUX_B, 0, 0),

            b'[' => {
                if self.intensity > 0 {
                    self.intensity -= 1;
                }
            }
            b']' => {
                if self.intensity < MAX_INTENSITY {
                    self.intensity += 1;
                }
            }
            b'*' => self.state = ParamState::SetIntensity,
            b'~' => self.intensity = NOMINAL_INTENSITY,

            b'$' => self.flags.put(ControlFlags::NO_CURSOR_INC, false),
            b'#' => self.flags.put(ControlFlags::NO_CURSOR_INC, true),
            b'!' => self.flags.put(ControlFlags::SINGLE_NO_INC, true),

            b'&' => self.flags.put(ControlFlags::OVERLAY, false),
            b'|' => self.flags.put(ControlFlags::OVERLAY, true),
            b'_' => self.flags.put(ControlFlags::SINGLE_OVERLAY, true),
            b'^' => {
                self.retreat_cursor();
                self.flags.put(ControlFlags::SINGLE_OVERLAY, true);
            }

            b'@' => self.state = ParamState::SetCursor,
            b'{' => self.flags.put(ControlFlags::NO_CURSOR_WRAP, true),
            b'}' => self.flags.put(ControlFlags::NO_CURSOR_WRAP, false),

            0x0C => {
                // \f - clear display, cursor home
                self.buf.clear();
                self.cursor = 0;
            }
            b'\r' => self.cursor = 0,
            b'\n' => self.buf.clear(),
            0x08 => self.retreat_cursor(),
            b'\t' => self.advance_cursor(false),
            0x0B => {
                // \v - partial reset: nominal intensity, cursor home, all
                // control flags off; does not clear the display
                self.intensity = MAX_INTENSITY;
                self.cursor = 0;
                self.flags.clear_all();
            }

            _ => {} // Everything else is a no-op
        }
    }

    /// Process a run of bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Move the cursor right
    ///
    /// `after_glyph` marks an advance that follows a displayable write,
    /// which the no-increment modes suppress (the single-shot one is
    /// consumed here). Explicit moves always advance.
    fn advance_cursor(&mut self, after_glyph: bool) {
        if after_glyph
            && (self.flags.get(ControlFlags::NO_CURSOR_INC)
                || self.flags.get(ControlFlags::SINGLE_NO_INC))
        {
            self.flags.put(ControlFlags::SINGLE_NO_INC, false);
            return;
        }

        self.cursor += 1;
        if self.flags.get(ControlFlags::NO_CURSOR_WRAP) {
            if self.cursor > WIDTH {
                self.cursor = WIDTH;
            }
        } else if self.cursor >= WIDTH {
            self.cursor = 0;
        }
    }

    /// Move the cursor left, wrapping to the rightmost tube unless wrap is
    /// disabled (then clamp at 0)
    fn retreat_cursor(&mut self) {
        if self.cursor == 0 {
            if !self.flags.get(ControlFlags::NO_CURSOR_WRAP) {
                self.cursor = WIDTH - 1;
            }
        } else {
            self.cursor -= 1;
        }
    }
}

impl fmt::Write for DisplayStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
