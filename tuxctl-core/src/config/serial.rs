//! Serial line parameters
//!
//! The controller talks at 9600 baud, 8N1. At that rate one byte takes about
//! a millisecond, so a six byte LED command and its three byte ACK keep the
//! line busy for roughly 9 ms. No host request waits for any of it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Baud rate the controller firmware expects
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    #[default]
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    #[default]
    One,
    Two,
}

/// Line settings the transport should open the port with
///
/// The engine never reads these; they are carried in [`ControllerConfig`]
/// so the code that opens the serial port and the code that attaches the
/// engine share one configuration.
///
/// [`ControllerConfig`]: super::ControllerConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl SerialConfig {
    /// Bits on the wire per character, including start, parity and stop bits
    pub fn bits_per_char(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        1 + data + parity + stop
    }

    /// Time to shift one character out, in microseconds (rounded up)
    pub fn byte_time_us(&self) -> u32 {
        let bits = self.bits_per_char() * 1_000_000;
        bits.div_ceil(self.baudrate.max(1))
    }

    /// Line time for a command of `tx_len` bytes and its `rx_len` byte reply
    pub fn round_trip_us(&self, tx_len: usize, rx_len: usize) -> u32 {
        let bytes = tx_len.saturating_add(rx_len);
        u32::try_from(bytes)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.byte_time_us())
    }
}
