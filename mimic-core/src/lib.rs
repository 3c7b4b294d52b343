//! Command-side logic for the ISS Mimic replica
//!
//! This crate sits between whatever produces intent (manual controls, a live
//! telemetry feed) and the byte-level protocol:
//!
//! - Named angle channels and the strict command validator
//! - Angle animation toward targets
//! - Manual and live-telemetry command sources
//! - Mapping of live ISS telemetry onto channels
//! - Transport trait and the connection-gated command link
//! - A simulated replica for loopback testing
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod command;
pub mod config;
pub mod control;
pub mod device;
pub mod link;
pub mod motion;
pub mod telemetry;
pub mod traits;
