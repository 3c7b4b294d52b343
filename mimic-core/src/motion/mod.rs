//! Motion smoothing
//!
//! Angle targets are approached in small fixed steps so the replica's servos
//! never jump across the full range in one packet.

pub mod animator;

pub use animator::{AngleAnimator, AnimationStep, DEFAULT_INTERVAL_MS, DEFAULT_STEP_DEG};
