//! Connection-gated command link
//!
//! Turns commands into packets and hands them to a [`Transport`] when it is
//! connected. Packets produced while the link is down are dropped, never
//! queued: every packet is self-contained and the replica only acts on the
//! latest one.
//!
//! [`Transport`]: crate::traits::Transport

pub mod command_link;

pub use command_link::{CommandLink, LinkError, LinkStats, SendOutcome};
