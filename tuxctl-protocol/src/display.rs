//! Seven-segment display encoding
//!
//! The host describes the display with a single packed `u32`:
//! - bits 0-15: one hex glyph per position (4 bits each, position 0 lowest)
//! - bits 16-19: which positions are lit
//! - bits 24-27: which decimal points are lit
//!
//! All other bits are ignored.

use crate::messages::MTCP_LED_SET;

/// Number of digit positions on the display
pub const DIGIT_COUNT: usize = 4;

/// Length of an encoded LED command
pub const LED_COMMAND_SIZE: usize = 2 + DIGIT_COUNT;

/// Output mask addressing all four positions
pub const ALL_POSITIONS: u8 = 0x0F;

/// Segment bit for the decimal point
pub const DECIMAL_POINT: u8 = 0x10;

/// Segment patterns for hex digits 0-F
pub const GLYPH_TABLE: [u8; 16] = [
    0xE7, // 0
    0x06, // 1
    0xCB, // 2
    0x8F, // 3
    0x2E, // 4
    0xAD, // 5
    0xED, // 6
    0x86, // 7
    0xEF, // 8
    0xAE, // 9
    0xEE, // A
    0x6D, // B
    0xE1, // C
    0x4F, // D
    0xE9, // E
    0xE8, // F
];

/// What the host wants the display to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayCommand {
    /// Glyph index (0x0-0xF) for each position
    glyphs: [u8; DIGIT_COUNT],
    /// Bit `i` set when position `i` is lit
    digits_on: u8,
    /// Bit `i` set when the decimal point after position `i` is lit
    decimals_on: u8,
}

impl DisplayCommand {
    /// Display with every segment off
    pub const fn blank() -> Self {
        Self {
            glyphs: [0; DIGIT_COUNT],
            digits_on: 0,
            decimals_on: 0,
        }
    }

    /// Create a command from per-position glyphs and enable masks
    ///
    /// Glyphs are truncated to their low nibble and masks to positions 0-3.
    pub fn new(glyphs: [u8; DIGIT_COUNT], digits_on: u8, decimals_on: u8) -> Self {
        Self {
            glyphs: glyphs.map(|g| g & 0x0F),
            digits_on: digits_on & ALL_POSITIONS,
            decimals_on: decimals_on & ALL_POSITIONS,
        }
    }

    /// Unpack the host's packed display argument
    pub fn from_packed(arg: u32) -> Self {
        let mut glyphs = [0u8; DIGIT_COUNT];
        for (i, glyph) in glyphs.iter_mut().enumerate() {
            *glyph = ((arg >> (4 * i)) & 0x0F) as u8;
        }

        Self {
            glyphs,
            digits_on: ((arg >> 16) & 0x0F) as u8,
            decimals_on: ((arg >> 24) & 0x0F) as u8,
        }
    }

    /// Pack back into the host argument layout
    pub fn to_packed(&self) -> u32 {
        let glyphs = self
            .glyphs
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &g)| acc | (u32::from(g) << (4 * i)));

        glyphs | (u32::from(self.digits_on) << 16) | (u32::from(self.decimals_on) << 24)
    }

    /// Glyph index at a position, `None` past the last digit
    pub fn glyph(&self, position: usize) -> Option<u8> {
        self.glyphs.get(position).copied()
    }

    /// Whether every field is within the ranges `new` would produce
    pub fn is_valid(&self) -> bool {
        self.glyphs.iter().all(|&g| g <= 0x0F)
            && self.digits_on <= ALL_POSITIONS
            && self.decimals_on <= ALL_POSITIONS
    }

    /// Whether the digit at `position` is lit
    pub fn digit_enabled(&self, position: usize) -> bool {
        position < DIGIT_COUNT && self.digits_on & (1 << position) != 0
    }

    /// Whether the decimal point at `position` is lit
    pub fn decimal_enabled(&self, position: usize) -> bool {
        position < DIGIT_COUNT && self.decimals_on & (1 << position) != 0
    }

    /// Segment byte sent for one position
    ///
    /// The decimal point is independent of the digit: a disabled digit with
    /// its decimal enabled shows only the point.
    pub fn segments(&self, position: usize) -> u8 {
        let mut out = 0;
        if self.digit_enabled(position) {
            out = GLYPH_TABLE[usize::from(self.glyphs[position] & 0x0F)];
        }
        if self.decimal_enabled(position) {
            out |= DECIMAL_POINT;
        }
        out
    }

    /// Encode into the six byte LED command
    pub fn encode(&self) -> EncodedDisplay {
        let mut bytes = [0u8; LED_COMMAND_SIZE];
        bytes[0] = MTCP_LED_SET;
        bytes[1] = ALL_POSITIONS;
        for position in 0..DIGIT_COUNT {
            bytes[2 + position] = self.segments(position);
        }
        EncodedDisplay(bytes)
    }
}

/// A complete LED command as sent on the wire
///
/// This is also what gets retained for replay after a controller reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedDisplay([u8; LED_COMMAND_SIZE]);

impl EncodedDisplay {
    /// LED command that turns every segment off
    pub const fn blank() -> Self {
        Self([MTCP_LED_SET, ALL_POSITIONS, 0, 0, 0, 0])
    }

    /// Raw bytes to put on the wire
    pub fn as_bytes(&self) -> &[u8; LED_COMMAND_SIZE] {
        &self.0
    }

    /// Segment bytes for the four positions
    pub fn segments(&self) -> &[u8] {
        &self.0[2..]
    }
}

impl Default for EncodedDisplay {
    fn default() -> Self {
        Self::blank()
    }
}

impl From<DisplayCommand> for EncodedDisplay {
    fn from(cmd: DisplayCommand) -> Self {
        cmd.encode()
    }
}
