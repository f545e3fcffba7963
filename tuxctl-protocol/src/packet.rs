//! Packet framing for controller → host traffic
//!
//! Packet format:
//! - OPCODE (1 byte): bit 7 clear
//! - B (1 byte): bit 7 set
//! - C (1 byte): bit 7 set
//!
//! The bit 7 convention lets the receiver find packet boundaries after
//! dropped or corrupted bytes.

use heapless::Vec;

/// Size of every controller → host packet
pub const PACKET_SIZE: usize = 3;

/// Bit that distinguishes data bytes from opcodes
const DATA_FLAG: u8 = 0x80;

/// Errors that can occur during packet framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// An opcode byte arrived where a data byte was expected.
    /// The partial packet was discarded and framing restarted at the new opcode.
    Resync,
}

/// State machine for framing incoming packets
#[derive(Debug, Clone, Default)]
pub struct PacketParser {
    buffer: Vec<u8, PACKET_SIZE>,
}

impl PacketParser {
    /// Create a new packet parser
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Whether the parser is in the middle of a packet
    pub fn is_partial(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(packet))` when a complete packet is framed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a framing error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<[u8; PACKET_SIZE]>, PacketError> {
        let is_data = byte & DATA_FLAG != 0;

        if self.buffer.is_empty() {
            // Silently ignore data bytes while waiting for an opcode
            if !is_data {
                let _ = self.buffer.push(byte);
            }
            return Ok(None);
        }

        if !is_data {
            self.buffer.clear();
            let _ = self.buffer.push(byte);
            return Err(PacketError::Resync);
        }

        // Cannot overflow: the buffer is drained as soon as it is full
        let _ = self.buffer.push(byte);
        if self.buffer.len() < PACKET_SIZE {
            return Ok(None);
        }

        let packet = [self.buffer[0], self.buffer[1], self.buffer[2]];
        self.reset();
        Ok(Some(packet))
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete packet found, if any.
    /// Remaining bytes after a complete packet are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<[u8; PACKET_SIZE]>, PacketError> {
        for &byte in bytes {
            if let Some(packet) = self.feed(byte)? {
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}
