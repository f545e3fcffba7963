//! Collaborator traits
//!
//! These traits define the interface between the protocol engine and the
//! transport and host it is attached to.

pub mod host;
pub mod transport;

pub use host::{HostDestination, NoDestination};
pub use transport::Transport;
