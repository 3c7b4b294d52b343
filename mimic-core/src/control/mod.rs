//! Command sources
//!
//! Two producers of intent drive the replica:
//! - Manual control: per-joint targets approached by animation
//! - Live mirroring: angles taken from the ISS telemetry feed

pub mod live;
pub mod manual;

pub use live::pump_telemetry;
pub use manual::{JointSelection, ManualControl};
