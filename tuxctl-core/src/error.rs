//! Errors reported to the host
//!
//! Only two things can fail: an unknown request id, and writing the
//! read-buttons result to the caller's memory. Sends are fire-and-forget and
//! state updates are plain memory writes.

/// Negated POSIX `EFAULT`
pub const EFAULT: i32 = 14;
/// Negated POSIX `EINVAL`
pub const EINVAL: i32 = 22;

/// The caller-supplied destination could not be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostMemoryFault;

/// Failure result of a host request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Unrecognized request id
    InvalidRequest,
    /// Read-buttons could not deliver its result.
    /// The destination's contents are unspecified.
    HostMemoryFault,
}

impl ControllerError {
    /// Negative errno for host ABIs that return integers
    pub fn errno(&self) -> i32 {
        match self {
            ControllerError::InvalidRequest => -EINVAL,
            ControllerError::HostMemoryFault => -EFAULT,
        }
    }
}

impl From<HostMemoryFault> for ControllerError {
    fn from(_: HostMemoryFault) -> Self {
        ControllerError::HostMemoryFault
    }
}
