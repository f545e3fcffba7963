//! Host request decoding
//!
//! Maps the host's numeric request ids onto the three operations the engine
//! implements.

use crate::error::ControllerError;

/// Request id: initialize the controller
pub const TUX_INIT: u32 = 0;
/// Request id: set the LED display
pub const TUX_SET_LED: u32 = 1;
/// Request id: read the button state
pub const TUX_BUTTONS: u32 = 2;

/// A decoded host request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostRequest {
    /// Enable button interrupts and user LED mode
    Initialize,
    /// Show the packed display argument
    SetDisplay(u32),
    /// Report the packed button mask
    ReadButtons,
}

impl HostRequest {
    /// Decode a request id and its argument
    pub fn from_raw(id: u32, arg: u32) -> Result<Self, ControllerError> {
        match id {
            TUX_INIT => Ok(HostRequest::Initialize),
            TUX_SET_LED => Ok(HostRequest::SetDisplay(arg)),
            TUX_BUTTONS => Ok(HostRequest::ReadButtons),
            _ => Err(ControllerError::InvalidRequest),
        }
    }

    /// Numeric id of this request
    pub fn id(&self) -> u32 {
        match self {
            HostRequest::Initialize => TUX_INIT,
            HostRequest::SetDisplay(_) => TUX_SET_LED,
            HostRequest::ReadButtons => TUX_BUTTONS,
        }
    }
}
