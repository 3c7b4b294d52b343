//! Configuration types
//!
//! Board-agnostic configuration structures. Persisted as postcard binary
//! data; the host loads them from TOML.

pub mod persist;
pub mod types;

pub use persist::*;
pub use types::*;
