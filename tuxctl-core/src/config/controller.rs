//! Controller configuration

use tuxctl_protocol::DisplayCommand;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::serial::SerialConfig;

/// Maximum size of a serialized [`ControllerConfig`]
pub const MAX_CONFIG_SIZE: usize = 32;

/// Errors from loading or storing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Stored bytes are not a valid configuration
    Decode,
    /// Output buffer too small
    BufferTooSmall,
}

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Display retained before the host's first set-display request.
    ///
    /// This is what a reset notification replays if it arrives first.
    /// Defaults to every segment off.
    pub initial_display: DisplayCommand,
    /// Line settings for the transport
    pub serial: SerialConfig,
}

#[cfg(feature = "serde")]
impl ControllerConfig {
    /// Decode a configuration from postcard bytes
    ///
    /// Glyphs above 0xF or enable bits past position 3 are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        if !config.initial_display.is_valid() {
            return Err(ConfigError::Decode);
        }
        Ok(config)
    }

    /// Encode this configuration into `buffer`
    ///
    /// Returns the number of bytes written
    pub fn to_bytes(&self, buffer: &mut [u8]) -> Result<usize, ConfigError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| ConfigError::BufferTooSmall)
    }
}
