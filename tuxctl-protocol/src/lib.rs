//! Tux Controller Wire Protocol
//!
//! This crate defines the byte-level protocol spoken between the host and the
//! Tux Controller over a 9600 baud serial line. All encoders and decoders are
//! pure functions with no shared state.
//!
//! # Protocol Overview
//!
//! Device → host packets are always three bytes:
//! ```text
//! ┌────────┬────────┬────────┐
//! │ OPCODE │ B      │ C      │
//! │ 0xxxxxxx 1xxxxxxx 1xxxxxxx
//! └────────┴────────┴────────┘
//! ```
//!
//! Host → device traffic is either a single control byte or the six byte
//! LED command:
//! ```text
//! ┌────────┬──────┬──────┬──────┬──────┬──────┐
//! │ LED_SET│ 0x0F │ POS0 │ POS1 │ POS2 │ POS3 │
//! └────────┴──────┴──────┴──────┴──────┴──────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod display;
pub mod messages;
pub mod packet;

pub use buttons::{Button, ButtonState, Buttons};
pub use display::{DisplayCommand, EncodedDisplay, DECIMAL_POINT, GLYPH_TABLE};
pub use messages::{ControlCommand, DevicePacket};
pub use packet::{PacketError, PacketParser, PACKET_SIZE};
