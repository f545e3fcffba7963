//! Serial transport abstraction
//!
//! The transport owns the line: queuing, flow control and byte framing all
//! happen on its side. The core only hands it complete commands.

/// Outbound half of the serial transport
///
/// `send` is fire-and-forget. It must accept the bytes for transmission and
/// return without waiting for them to leave the wire or for any reply.
/// Both the packet callback and host request handlers call it, possibly at
/// the same time, so it takes `&self`.
pub trait Transport {
    /// Queue bytes for transmission
    fn send(&self, bytes: &[u8]);
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, bytes: &[u8]) {
        (**self).send(bytes)
    }
}
