//! Host-side link for the ISS Mimic replica
//!
//! Glues the no_std core to a real machine:
//! - [`config`]: TOML configuration files
//! - [`transport`]: packets over any blocking byte writer
//! - [`session`]: command sources driving one link
//!
//! Logging goes through the `log` facade; install any logger to see it.

pub mod config;
pub mod session;
pub mod transport;

pub use config::{load_config, parse_config, LoadError};
pub use session::{ControlMode, MimicSession};
pub use transport::IoTransport;
