//! Named angle channels
//!
//! Each channel occupies a fixed slot in the six-angle packet.

use mimic_protocol::ANGLE_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One commandable rotation joint of the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleChannel {
    /// Beta gimbal of panel 1 (red)
    #[cfg_attr(feature = "serde", serde(rename = "panel1"))]
    Panel1Beta,
    /// Beta gimbal of panel 2 (orange)
    #[cfg_attr(feature = "serde", serde(rename = "panel2"))]
    Panel2Beta,
    /// Beta gimbal of panel 3 (green)
    #[cfg_attr(feature = "serde", serde(rename = "panel3"))]
    Panel3Beta,
    /// Beta gimbal of panel 4 (purple)
    #[cfg_attr(feature = "serde", serde(rename = "panel4"))]
    Panel4Beta,
    /// Alpha rotary joint carrying panels 1 and 2
    #[cfg_attr(feature = "serde", serde(rename = "group1"))]
    Group1Alpha,
    /// Alpha rotary joint carrying panels 3 and 4
    #[cfg_attr(feature = "serde", serde(rename = "group2"))]
    Group2Alpha,
}

impl AngleChannel {
    /// All channels in packet slot order
    pub const ALL: [AngleChannel; ANGLE_COUNT] = [
        AngleChannel::Panel1Beta,
        AngleChannel::Panel2Beta,
        AngleChannel::Panel3Beta,
        AngleChannel::Panel4Beta,
        AngleChannel::Group1Alpha,
        AngleChannel::Group2Alpha,
    ];

    /// Beta channels only
    pub const BETA: [AngleChannel; 4] = [
        AngleChannel::Panel1Beta,
        AngleChannel::Panel2Beta,
        AngleChannel::Panel3Beta,
        AngleChannel::Panel4Beta,
    ];

    /// Alpha channels only
    pub const ALPHA: [AngleChannel; 2] = [AngleChannel::Group1Alpha, AngleChannel::Group2Alpha];

    /// Packet slot (angle0..angle5)
    pub const fn slot(self) -> usize {
        match self {
            AngleChannel::Panel1Beta => 0,
            AngleChannel::Panel2Beta => 1,
            AngleChannel::Panel3Beta => 2,
            AngleChannel::Panel4Beta => 3,
            AngleChannel::Group1Alpha => 4,
            AngleChannel::Group2Alpha => 5,
        }
    }

    /// Channel at a packet slot
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// Short name used in configuration and logs
    pub const fn name(self) -> &'static str {
        match self {
            AngleChannel::Panel1Beta => "panel1",
            AngleChannel::Panel2Beta => "panel2",
            AngleChannel::Panel3Beta => "panel3",
            AngleChannel::Panel4Beta => "panel4",
            AngleChannel::Group1Alpha => "group1",
            AngleChannel::Group2Alpha => "group2",
        }
    }

    /// Parse a short name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }

    pub const fn is_alpha(self) -> bool {
        matches!(self, AngleChannel::Group1Alpha | AngleChannel::Group2Alpha)
    }

    pub const fn is_beta(self) -> bool {
        !self.is_alpha()
    }

    /// Rest position: alpha joints at 0°, beta gimbals at 90°
    pub const fn home_deg(self) -> f32 {
        if self.is_alpha() {
            0.0
        } else {
            90.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_positional() {
        for (slot, channel) in AngleChannel::ALL.iter().enumerate() {
            assert_eq!(channel.slot(), slot);
            assert_eq!(AngleChannel::from_slot(slot), Some(*channel));
        }
        assert_eq!(AngleChannel::from_slot(ANGLE_COUNT), None);
    }

    #[test]
    fn test_name_roundtrip() {
        for channel in AngleChannel::ALL {
            assert_eq!(AngleChannel::from_name(channel.name()), Some(channel));
        }
        assert_eq!(AngleChannel::from_name("panel5"), None);
    }

    #[test]
    fn test_groups() {
        assert!(AngleChannel::ALPHA.iter().all(|c| c.is_alpha()));
        assert!(AngleChannel::BETA.iter().all(|c| c.is_beta()));
        assert_eq!(AngleChannel::Group1Alpha.home_deg(), 0.0);
        assert_eq!(AngleChannel::Panel3Beta.home_deg(), 90.0);
    }
}
