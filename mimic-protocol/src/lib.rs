//! ISS Mimic Robot Command Protocol
//!
//! This crate defines the fixed-length packets written to the replica's
//! gamepad characteristic. Every packet is self-contained: there are no
//! sequence numbers and no session state beyond the leading version byte.
//!
//! # Packet Overview
//!
//! Version 0x02 (six angle channels):
//! ```text
//! ┌─────────┬──────────────────────┬──────────┬───────────────┐
//! │ VERSION │ ANGLE0 .. ANGLE5     │ BUTTONS  │ KEY CODES     │
//! │ 1B      │ 6 × u16 LE (0–360)   │ 2B       │ 11B, 0-padded │
//! └─────────┴──────────────────────┴──────────┴───────────────┘
//! ```
//!
//! Version 0x01 is the earlier four-axis gamepad layout. The version byte is
//! a hard discriminator: a buffer is only ever interpreted under the layout
//! its first byte names.
//!
//! Encoding is total. Out-of-range angles are clamped, surplus key codes are
//! dropped. Decoding reports malformed lengths and unknown versions as
//! distinct errors.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod legacy;
pub mod packet;
pub mod telemetry;
pub mod version;

pub use buttons::{is_button_bit_set, set_button_bit, ButtonByte, ButtonError, ButtonState};
pub use legacy::{AxisPacket, AXIS_CENTER, AXIS_COUNT, LEGACY_PACKET_LEN, LEGACY_PACKET_VERSION};
pub use packet::{
    encode_angles, AnglePacket, Degrees, PacketError, ANGLE_COUNT, MAX_ANGLE_DEG, MAX_KEY_CODES,
    PACKET_LEN, PACKET_VERSION,
};
pub use telemetry::{TelemetryError, TelemetryReport, MAX_TELEMETRY_LEN};
pub use version::{PacketVersion, RobotPacket, MAX_PACKET_LEN};
