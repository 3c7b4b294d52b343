//! Four-axis gamepad packet (version 0x01)
//!
//! The first revision of the link carried joystick axes rather than angles:
//! - VERSION (1 byte): 0x01
//! - AXIS0..AXIS3 (4 bytes): raw axis values, 127 = centre
//! - BUTTONS (2 bytes)
//! - KEY CODES (11 bytes), zero padded
//!
//! It is incompatible with the six-angle layout and is kept only so that
//! older replicas can still be driven and their traffic parsed.

use crate::buttons::ButtonState;
use crate::packet::{PacketError, MAX_KEY_CODES};

/// Version tag of the legacy layout
pub const LEGACY_PACKET_VERSION: u8 = 0x01;

/// Number of joystick axes
pub const AXIS_COUNT: usize = 4;

/// Axis value for a centred stick
pub const AXIS_CENTER: u8 = 127;

/// Total legacy packet length
pub const LEGACY_PACKET_LEN: usize = 1 + AXIS_COUNT + 2 + MAX_KEY_CODES;

const BUTTONS_OFFSET: usize = 1 + AXIS_COUNT;
const KEY_CODES_OFFSET: usize = BUTTONS_OFFSET + 2;

/// A legacy four-axis gamepad packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisPacket {
    /// Raw axis values (0-255, 127 centred)
    pub axes: [u8; AXIS_COUNT],
    /// Button flag registers
    pub buttons: ButtonState,
    /// Auxiliary key codes, zero padded
    pub key_codes: [u8; MAX_KEY_CODES],
}

impl Default for AxisPacket {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisPacket {
    /// Create a packet with all axes centred and nothing pressed
    pub const fn new() -> Self {
        Self {
            axes: [AXIS_CENTER; AXIS_COUNT],
            buttons: ButtonState::released(),
            key_codes: [0; MAX_KEY_CODES],
        }
    }

    /// Set one axis; indices past the last axis are ignored
    pub fn with_axis(mut self, index: usize, value: u8) -> Self {
        if let Some(axis) = self.axes.get_mut(index) {
            *axis = value;
        }
        self
    }

    /// Set the button registers
    pub fn with_buttons(mut self, buttons: ButtonState) -> Self {
        self.buttons = buttons;
        self
    }

    /// Copy auxiliary key codes, dropping any beyond the eleventh
    pub fn with_key_codes(mut self, codes: &[u8]) -> Self {
        let len = codes.len().min(MAX_KEY_CODES);
        self.key_codes = [0; MAX_KEY_CODES];
        self.key_codes[..len].copy_from_slice(&codes[..len]);
        self
    }

    /// Encode into a fresh fixed-length buffer
    pub fn encode(&self) -> [u8; LEGACY_PACKET_LEN] {
        let mut buffer = [0u8; LEGACY_PACKET_LEN];
        buffer[0] = LEGACY_PACKET_VERSION;
        buffer[1..BUTTONS_OFFSET].copy_from_slice(&self.axes);
        buffer[BUTTONS_OFFSET..KEY_CODES_OFFSET].copy_from_slice(&self.buttons.to_bytes());
        buffer[KEY_CODES_OFFSET..].copy_from_slice(&self.key_codes);
        buffer
    }

    /// Decode a legacy packet
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        if data.len() != LEGACY_PACKET_LEN {
            return Err(PacketError::Malformed {
                expected: LEGACY_PACKET_LEN,
                actual: data.len(),
            });
        }

        if data[0] != LEGACY_PACKET_VERSION {
            return Err(PacketError::UnsupportedVersion(data[0]));
        }

        let mut axes = [0u8; AXIS_COUNT];
        axes.copy_from_slice(&data[1..BUTTONS_OFFSET]);

        let mut key_codes = [0u8; MAX_KEY_CODES];
        key_codes.copy_from_slice(&data[KEY_CODES_OFFSET..]);

        Ok(Self {
            axes,
            buttons: ButtonState::new(data[BUTTONS_OFFSET], data[BUTTONS_OFFSET + 1]),
            key_codes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{AnglePacket, PACKET_VERSION};

    #[test]
    fn test_default_packet_is_centred() {
        let bytes = AxisPacket::new().encode();
        assert_eq!(bytes.len(), 18);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(&bytes[1..5], &[127, 127, 127, 127]);
        assert_eq!(&bytes[5..7], &[0, 0]);
        assert!(bytes[7..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_move_forward() {
        let bytes = AxisPacket::new().with_axis(1, 0).encode();
        assert_eq!(&bytes[1..5], &[127, 0, 127, 127]);
    }

    #[test]
    fn test_roundtrip_with_buttons_and_keys() {
        let original = AxisPacket::new()
            .with_axis(0, 255)
            .with_buttons(ButtonState::new(7, 0))
            .with_key_codes(&[0x57, 0x41]);
        let decoded = AxisPacket::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_six_angle_packet_is_not_legacy() {
        let bytes = AnglePacket::new().encode();
        assert!(matches!(
            AxisPacket::decode(&bytes),
            Err(PacketError::Malformed { .. })
        ));

        let mut padded = [0u8; LEGACY_PACKET_LEN];
        padded[0] = PACKET_VERSION;
        assert_eq!(
            AxisPacket::decode(&padded),
            Err(PacketError::UnsupportedVersion(PACKET_VERSION))
        );
    }
}
