//! Opcodes and message types for the Tux Controller protocol
//!
//! Message types are divided into two categories:
//! - Device → Host: acknowledgements, button events, reset notifications
//! - Host → Device: single-byte control commands and the LED command

use crate::packet::PACKET_SIZE;

/// Build a device response opcode from its response number
const fn resp(n: u8) -> u8 {
    (n & 0x07) | ((n & 0x18) << 1) | 0x40
}

/// Build a host command opcode from its command number
const fn cmd(n: u8) -> u8 {
    0xC0 | n
}

// Opcodes: Device → Host
pub const MTCP_ACK: u8 = resp(0x0);
pub const MTCP_BIOC_EVENT: u8 = resp(0x1);
pub const MTCP_POLL_OK: u8 = resp(0x3);
pub const MTCP_RESET: u8 = resp(0x6);

// Opcodes: Host → Device
pub const MTCP_BIOC_ON: u8 = cmd(0x3);
pub const MTCP_LED_SET: u8 = cmd(0x6);
pub const MTCP_LED_USR: u8 = cmd(0x8);

/// Packets received from the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DevicePacket {
    /// The previous command was accepted
    Ack,
    /// Button state changed; carries the two raw status bytes
    ButtonEvent { b: u8, c: u8 },
    /// The controller power-cycled and lost its configuration
    Reset,
    /// Response to a poll request
    PollOk,
    /// Opcode this core does not know about
    Unknown(u8),
}

impl DevicePacket {
    /// Classify a framed packet by its opcode
    pub fn from_bytes(packet: [u8; PACKET_SIZE]) -> Self {
        let [op, b, c] = packet;
        match op {
            MTCP_ACK => DevicePacket::Ack,
            MTCP_BIOC_EVENT => DevicePacket::ButtonEvent { b, c },
            MTCP_RESET => DevicePacket::Reset,
            MTCP_POLL_OK => DevicePacket::PollOk,
            other => DevicePacket::Unknown(other),
        }
    }

    /// Opcode byte of this packet
    pub fn opcode(&self) -> u8 {
        match self {
            DevicePacket::Ack => MTCP_ACK,
            DevicePacket::ButtonEvent { .. } => MTCP_BIOC_EVENT,
            DevicePacket::Reset => MTCP_RESET,
            DevicePacket::PollOk => MTCP_POLL_OK,
            DevicePacket::Unknown(op) => *op,
        }
    }
}

/// Single-byte configuration commands sent to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCommand {
    /// Report button changes as they happen
    EnableButtonInterrupts,
    /// Let the host drive the LEDs instead of the built-in clock
    EnableUserLedMode,
}

impl ControlCommand {
    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            ControlCommand::EnableButtonInterrupts => MTCP_BIOC_ON,
            ControlCommand::EnableUserLedMode => MTCP_LED_USR,
        }
    }

    /// Commands that bring a freshly reset controller into the configured state,
    /// in the order they must be sent
    pub const STARTUP: [ControlCommand; 2] = [
        ControlCommand::EnableButtonInterrupts,
        ControlCommand::EnableUserLedMode,
    ];
}
