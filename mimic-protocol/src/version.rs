//! Packet version discrimination
//!
//! The leading byte selects the layout. Decoding dispatches on it once and
//! never reinterprets fields across layouts.

use heapless::Vec;

use crate::legacy::{AxisPacket, LEGACY_PACKET_LEN, LEGACY_PACKET_VERSION};
use crate::packet::{AnglePacket, PacketError, PACKET_LEN, PACKET_VERSION};

/// Length of the largest known layout
pub const MAX_PACKET_LEN: usize = if PACKET_LEN > LEGACY_PACKET_LEN {
    PACKET_LEN
} else {
    LEGACY_PACKET_LEN
};

/// Known packet layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketVersion {
    /// Four 8-bit joystick axes
    V1Legacy,
    /// Six 16-bit angle channels
    V2SixAngle,
}

impl PacketVersion {
    /// Parse a version from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            LEGACY_PACKET_VERSION => Some(PacketVersion::V1Legacy),
            PACKET_VERSION => Some(PacketVersion::V2SixAngle),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn as_byte(self) -> u8 {
        match self {
            PacketVersion::V1Legacy => LEGACY_PACKET_VERSION,
            PacketVersion::V2SixAngle => PACKET_VERSION,
        }
    }

    /// Fixed length of packets in this layout
    pub fn packet_len(self) -> usize {
        match self {
            PacketVersion::V1Legacy => LEGACY_PACKET_LEN,
            PacketVersion::V2SixAngle => PACKET_LEN,
        }
    }
}

/// A decoded packet of any known version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotPacket {
    V1Legacy(AxisPacket),
    V2SixAngle(AnglePacket),
}

impl From<AnglePacket> for RobotPacket {
    fn from(packet: AnglePacket) -> Self {
        RobotPacket::V2SixAngle(packet)
    }
}

impl From<AxisPacket> for RobotPacket {
    fn from(packet: AxisPacket) -> Self {
        RobotPacket::V1Legacy(packet)
    }
}

impl RobotPacket {
    /// Decode a packet, choosing the layout from the version byte
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        let first = *data.first().ok_or(PacketError::Malformed {
            expected: PACKET_LEN,
            actual: 0,
        })?;

        match PacketVersion::from_byte(first) {
            Some(PacketVersion::V1Legacy) => AxisPacket::decode(data).map(RobotPacket::V1Legacy),
            Some(PacketVersion::V2SixAngle) => AnglePacket::decode(data).map(RobotPacket::V2SixAngle),
            None => Err(PacketError::UnsupportedVersion(first)),
        }
    }

    /// Layout of this packet
    pub fn version(&self) -> PacketVersion {
        match self {
            RobotPacket::V1Legacy(_) => PacketVersion::V1Legacy,
            RobotPacket::V2SixAngle(_) => PacketVersion::V2SixAngle,
        }
    }

    /// Encode into a heapless Vec sized for any layout
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_PACKET_LEN> {
        let mut vec = Vec::new();
        // Every layout fits MAX_PACKET_LEN, so the extend cannot fail
        let _ = match self {
            RobotPacket::V1Legacy(packet) => vec.extend_from_slice(&packet.encode()),
            RobotPacket::V2SixAngle(packet) => vec.extend_from_slice(&packet.encode()),
        };
        vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::ButtonState;

    #[test]
    fn test_version_roundtrip() {
        for version in [PacketVersion::V1Legacy, PacketVersion::V2SixAngle] {
            assert_eq!(PacketVersion::from_byte(version.as_byte()), Some(version));
        }
        assert_eq!(PacketVersion::from_byte(0x00), None);
        assert_eq!(PacketVersion::from_byte(0x03), None);
    }

    #[test]
    fn test_packet_lengths() {
        assert_eq!(PacketVersion::V1Legacy.packet_len(), 18);
        assert_eq!(PacketVersion::V2SixAngle.packet_len(), 26);
        assert_eq!(MAX_PACKET_LEN, 26);
    }

    #[test]
    fn test_dispatch_six_angle() {
        let packet = AnglePacket::new()
            .with_angles([10, 20, 30, 40, 50, 60])
            .with_buttons(ButtonState::new(1, 0));
        let decoded = RobotPacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded, RobotPacket::V2SixAngle(packet));
        assert_eq!(decoded.version(), PacketVersion::V2SixAngle);
    }

    #[test]
    fn test_dispatch_legacy() {
        let packet = AxisPacket::new().with_axis(0, 0);
        let decoded = RobotPacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded, RobotPacket::V1Legacy(packet));
    }

    #[test]
    fn test_unknown_version_is_not_garbage() {
        let mut bytes = AnglePacket::new().with_angle(0, 90).encode();
        bytes[0] = 0xFF;
        assert_eq!(
            RobotPacket::decode(&bytes),
            Err(PacketError::UnsupportedVersion(0xFF))
        );
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        assert!(matches!(
            RobotPacket::decode(&[]),
            Err(PacketError::Malformed { actual: 0, .. })
        ));
    }

    #[test]
    fn test_legacy_tag_with_six_angle_length() {
        let mut bytes = AnglePacket::new().encode();
        bytes[0] = LEGACY_PACKET_VERSION;
        assert_eq!(
            RobotPacket::decode(&bytes),
            Err(PacketError::Malformed {
                expected: LEGACY_PACKET_LEN,
                actual: PACKET_LEN
            })
        );
    }

    #[test]
    fn test_encode_to_vec_matches_layout() {
        let angle = RobotPacket::from(AnglePacket::new().with_angle(2, 270));
        assert_eq!(angle.encode_to_vec().len(), PACKET_LEN);

        let legacy = RobotPacket::from(AxisPacket::new());
        assert_eq!(legacy.encode_to_vec().len(), LEGACY_PACKET_LEN);
        assert_eq!(legacy.encode_to_vec()[0], LEGACY_PACKET_VERSION);
    }
}
