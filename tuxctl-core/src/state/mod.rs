//! Shared device state
//!
//! The only mutable state shared between the packet callback and the host
//! request handlers. Both halves live behind one lock because reset recovery
//! treats them as a pair.

pub mod shared;

pub use shared::{DeviceState, SharedState};
