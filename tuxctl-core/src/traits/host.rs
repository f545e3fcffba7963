//! Host memory abstraction
//!
//! Read-buttons delivers its result into a location the host chose. On a
//! kernel-style host that location may be invalid, so the copy can fail.

use crate::error::HostMemoryFault;

/// Destination for a request's 4-byte result
pub trait HostDestination {
    /// Copy the native-endian result bytes into the destination
    fn write(&mut self, value: [u8; 4]) -> Result<(), HostMemoryFault>;
}

impl HostDestination for u32 {
    fn write(&mut self, value: [u8; 4]) -> Result<(), HostMemoryFault> {
        *self = u32::from_ne_bytes(value);
        Ok(())
    }
}

impl HostDestination for [u8; 4] {
    fn write(&mut self, value: [u8; 4]) -> Result<(), HostMemoryFault> {
        *self = value;
        Ok(())
    }
}

/// Destination for requests that produce no output
///
/// Writing to it always faults, like a null user pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDestination;

impl HostDestination for NoDestination {
    fn write(&mut self, _value: [u8; 4]) -> Result<(), HostMemoryFault> {
        Err(HostMemoryFault)
    }
}

impl<D: HostDestination + ?Sized> HostDestination for &mut D {
    fn write(&mut self, value: [u8; 4]) -> Result<(), HostMemoryFault> {
        (**self).write(value)
    }
}
