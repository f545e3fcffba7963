//! Button state reported by the controller
//!
//! Each button event carries two raw status bytes. The low nibble of the
//! first byte holds the action buttons, the low nibble of the second holds
//! the direction pad. The host sees both nibbles packed into one byte.

/// Logical buttons, numbered by their bit in the host mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Start,
    A,
    B,
    C,
    Up,
    Left,
    Down,
    Right,
}

impl Button {
    /// All buttons in host bit order
    pub const ALL: [Button; 8] = [
        Button::Start,
        Button::A,
        Button::B,
        Button::C,
        Button::Up,
        Button::Left,
        Button::Down,
        Button::Right,
    ];

    /// Bit in the host mask for this button
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// The two most recent raw status bytes from a button event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub raw_byte_0: u8,
    pub raw_byte_1: u8,
}

impl ButtonState {
    /// Decode a button event payload
    ///
    /// The raw bytes are the state; nothing is transformed here.
    pub const fn from_event(b: u8, c: u8) -> Self {
        Self {
            raw_byte_0: b,
            raw_byte_1: c,
        }
    }

    /// Pack into the value handed to the host
    ///
    /// Low nibble of byte 0 lands in bits 0-3, low nibble of byte 1 in bits
    /// 4-7. Bits 8-31 are always zero.
    pub fn pack_for_host(&self) -> u32 {
        u32::from(self.raw_byte_0 & 0x0F) | (u32::from(self.raw_byte_1 & 0x0F) << 4)
    }

    /// Host view of this state
    pub fn buttons(&self) -> Buttons {
        Buttons(self.pack_for_host() as u8)
    }
}

/// Packed host button mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u8);

impl Buttons {
    /// Check whether a button's bit is set
    pub fn is_pressed(&self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// Iterate over the buttons whose bit is set
    pub fn pressed(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.is_pressed(*b))
    }
}

impl From<Buttons> for u32 {
    fn from(buttons: Buttons) -> Self {
        u32::from(buttons.0)
    }
}
