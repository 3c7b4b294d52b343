//! Six-angle command packet (version 0x02)
//!
//! Packet layout:
//! - VERSION (1 byte): 0x02
//! - ANGLE0..ANGLE5 (12 bytes): u16 little-endian degrees, 0-360
//! - BUTTONS (2 bytes): byte0, byte1 flag registers
//! - KEY CODES (11 bytes): auxiliary key codes, zero padded
//!
//! The packet is always 26 bytes long, whatever the caller filled in.

use crate::buttons::ButtonState;

/// Version tag of this layout
pub const PACKET_VERSION: u8 = 0x02;

/// Number of angle channels
pub const ANGLE_COUNT: usize = 6;

/// Number of auxiliary key code slots
pub const MAX_KEY_CODES: usize = 11;

/// Largest angle that can be transmitted (degrees)
pub const MAX_ANGLE_DEG: u16 = 360;

/// Total packet length (VERSION + ANGLES + BUTTONS + KEY CODES)
pub const PACKET_LEN: usize = 1 + ANGLE_COUNT * 2 + 2 + MAX_KEY_CODES;

const ANGLES_OFFSET: usize = 1;
const BUTTONS_OFFSET: usize = ANGLES_OFFSET + ANGLE_COUNT * 2;
const KEY_CODES_OFFSET: usize = BUTTONS_OFFSET + 2;

/// Errors that can occur while decoding or encoding packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Buffer length does not match the layout
    Malformed { expected: usize, actual: usize },
    /// Version byte names no known layout
    UnsupportedVersion(u8),
    /// Decoded angle exceeds 360 degrees
    AngleOutOfRange { slot: u8, value: u16 },
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl core::fmt::Display for PacketError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PacketError::Malformed { expected, actual } => {
                write!(f, "malformed packet: expected {} bytes, got {}", expected, actual)
            }
            PacketError::UnsupportedVersion(version) => {
                write!(f, "unsupported packet version 0x{:02X}", version)
            }
            PacketError::AngleOutOfRange { slot, value } => {
                write!(f, "angle{} = {} exceeds {} degrees", slot, value, MAX_ANGLE_DEG)
            }
            PacketError::BufferTooSmall => write!(f, "buffer too small for packet"),
        }
    }
}

/// Conversion of a numeric value into a transmittable angle
///
/// Values are clamped to 0-360 and truncated toward zero. NaN maps to 0.
pub trait Degrees {
    fn to_wire_degrees(self) -> u16;
}

macro_rules! impl_degrees_unsigned {
    ($($t:ty),*) => {
        $(
            impl Degrees for $t {
                fn to_wire_degrees(self) -> u16 {
                    (self as u64).min(MAX_ANGLE_DEG as u64) as u16
                }
            }
        )*
    };
}

macro_rules! impl_degrees_signed {
    ($($t:ty),*) => {
        $(
            impl Degrees for $t {
                fn to_wire_degrees(self) -> u16 {
                    (self as i64).clamp(0, MAX_ANGLE_DEG as i64) as u16
                }
            }
        )*
    };
}

macro_rules! impl_degrees_float {
    ($($t:ty),*) => {
        $(
            impl Degrees for $t {
                fn to_wire_degrees(self) -> u16 {
                    // Float-to-int casts saturate and send NaN to zero
                    (self as u16).min(MAX_ANGLE_DEG)
                }
            }
        )*
    };
}

impl_degrees_unsigned!(u8, u16, u32, u64, usize);
impl_degrees_signed!(i8, i16, i32, i64, isize);
impl_degrees_float!(f32, f64);

/// A six-angle command packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnglePacket {
    /// Angle per channel in whole degrees
    pub angles: [u16; ANGLE_COUNT],
    /// Button flag registers
    pub buttons: ButtonState,
    /// Auxiliary key codes, zero padded
    pub key_codes: [u8; MAX_KEY_CODES],
}

impl AnglePacket {
    /// Create a packet with every field zeroed
    pub const fn new() -> Self {
        Self {
            angles: [0; ANGLE_COUNT],
            buttons: ButtonState::released(),
            key_codes: [0; MAX_KEY_CODES],
        }
    }

    /// Set one angle slot (0-5), clamping the value
    ///
    /// Slots past the last channel are ignored.
    pub fn with_angle(mut self, slot: usize, degrees: impl Degrees) -> Self {
        if let Some(angle) = self.angles.get_mut(slot) {
            *angle = degrees.to_wire_degrees();
        }
        self
    }

    /// Set all six angle slots at once
    pub fn with_angles<D: Degrees>(mut self, angles: [D; ANGLE_COUNT]) -> Self {
        for (slot, degrees) in angles.into_iter().enumerate() {
            self.angles[slot] = degrees.to_wire_degrees();
        }
        self
    }

    /// Set the button registers
    pub fn with_buttons(mut self, buttons: ButtonState) -> Self {
        self.buttons = buttons;
        self
    }

    /// Copy auxiliary key codes into the packet
    ///
    /// Codes beyond the eleventh are dropped; remaining slots are zeroed.
    pub fn with_key_codes(mut self, codes: &[u8]) -> Self {
        let len = codes.len().min(MAX_KEY_CODES);
        self.key_codes = [0; MAX_KEY_CODES];
        self.key_codes[..len].copy_from_slice(&codes[..len]);
        self
    }

    /// Encode into a fresh fixed-length buffer
    pub fn encode(&self) -> [u8; PACKET_LEN] {
        let mut buffer = [0u8; PACKET_LEN];
        self.write_layout(&mut buffer);
        buffer
    }

    /// Encode into a caller-provided buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let out = buffer
            .get_mut(..PACKET_LEN)
            .ok_or(PacketError::BufferTooSmall)?;
        self.write_layout(out);
        Ok(PACKET_LEN)
    }

    fn write_layout(&self, out: &mut [u8]) {
        out[0] = PACKET_VERSION;
        for (slot, angle) in self.angles.iter().enumerate() {
            let offset = ANGLES_OFFSET + slot * 2;
            let bytes = (*angle).min(MAX_ANGLE_DEG).to_le_bytes();
            out[offset] = bytes[0];
            out[offset + 1] = bytes[1];
        }
        out[BUTTONS_OFFSET..KEY_CODES_OFFSET].copy_from_slice(&self.buttons.to_bytes());
        out[KEY_CODES_OFFSET..PACKET_LEN].copy_from_slice(&self.key_codes);
    }

    /// Decode a packet
    ///
    /// Length is checked before the version byte, so a short buffer is always
    /// reported as malformed.
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        if data.len() != PACKET_LEN {
            return Err(PacketError::Malformed {
                expected: PACKET_LEN,
                actual: data.len(),
            });
        }

        if data[0] != PACKET_VERSION {
            return Err(PacketError::UnsupportedVersion(data[0]));
        }

        let mut angles = [0u16; ANGLE_COUNT];
        for (slot, angle) in angles.iter_mut().enumerate() {
            let offset = ANGLES_OFFSET + slot * 2;
            let value = data[offset] as u16 | ((data[offset + 1] as u16) << 8);
            if value > MAX_ANGLE_DEG {
                return Err(PacketError::AngleOutOfRange {
                    slot: slot as u8,
                    value,
                });
            }
            *angle = value;
        }

        let buttons = ButtonState::new(data[BUTTONS_OFFSET], data[BUTTONS_OFFSET + 1]);

        let mut key_codes = [0u8; MAX_KEY_CODES];
        key_codes.copy_from_slice(&data[KEY_CODES_OFFSET..PACKET_LEN]);

        Ok(Self {
            angles,
            buttons,
            key_codes,
        })
    }
}

/// Encode a packet from optional inputs
///
/// Missing angles encode as 0. Never fails.
pub fn encode_angles(
    angles: [Option<f64>; ANGLE_COUNT],
    buttons: ButtonState,
    key_codes: &[u8],
) -> [u8; PACKET_LEN] {
    AnglePacket::new()
        .with_angles(angles.map(|angle| angle.unwrap_or(0.0)))
        .with_buttons(buttons)
        .with_key_codes(key_codes)
        .encode()
}
