//! Board-agnostic control logic for the Tux Controller
//!
//! This crate contains everything between the host-facing request table and
//! the serial transport:
//!
//! - Shared display and button state behind a single lock
//! - Asynchronous handling of controller packets (ACK, button events, resets)
//! - Synchronous host requests (initialize, set display, read buttons)
//! - Collaborator traits for the transport and host memory
//! - Configuration type definitions
//!
//! # Example
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use tuxctl_core::{Controller, ControllerConfig, Transport};
//!
//! struct Null;
//! impl Transport for Null {
//!     fn send(&self, _bytes: &[u8]) {}
//! }
//!
//! let ctl: Controller<NoopRawMutex, _> = Controller::new(Null, &ControllerConfig::default());
//! ctl.initialize();
//! ctl.set_display(0x000F_1234);
//! ctl.handle_packet([0x41, 0x85, 0x8A]);
//!
//! let mut buttons = 0u32;
//! ctl.read_buttons(&mut buttons).unwrap();
//! assert_eq!(buttons, 0xA5);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod request;
pub mod state;
pub mod traits;

pub use config::{ControllerConfig, SerialConfig};
pub use controller::Controller;
pub use error::{ControllerError, HostMemoryFault};
pub use request::HostRequest;
pub use state::{DeviceState, SharedState};
pub use traits::{HostDestination, NoDestination, Transport};
