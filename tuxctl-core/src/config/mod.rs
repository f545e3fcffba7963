//! Configuration types
//!
//! Controller configuration, optionally stored as postcard-serialized
//! binary data when the `serde` feature is enabled.

pub mod controller;
pub mod serial;

pub use controller::*;
pub use serial::*;
