//! Abstraction traits
//!
//! These traits define the interface between the command logic and the
//! byte-delivery channel to the replica.

pub mod transport;

pub use transport::Transport;
