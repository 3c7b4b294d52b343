//! Simulated replica
//!
//! A software stand-in for the replica controller. It parses packets with
//! the same layout the firmware uses and drives virtual servo outputs, so
//! command paths can be exercised end to end without hardware.

pub mod replica;
pub mod servo;

pub use replica::{ReplicaStats, SimulatedReplica};
pub use servo::fold_to_servo;
