//! Live ISS telemetry mapped onto replica channels
//!
//! The public ISS telemetry stream publishes joint angles under fixed item
//! identifiers. Only the six items below drive the replica.

pub mod mirror;

pub use mirror::{TelemetryMirror, TelemetryReading};

use crate::command::AngleChannel;

/// Telemetry item identifiers in channel slot order
pub const TELEMETRY_ITEMS: [(&str, AngleChannel); 6] = [
    ("P4000007", AngleChannel::Panel1Beta),  // BGA 1
    ("P6000007", AngleChannel::Panel2Beta),  // BGA 3
    ("S4000007", AngleChannel::Panel3Beta),  // BGA 5
    ("S6000007", AngleChannel::Panel4Beta),  // BGA 7
    ("S0000003", AngleChannel::Group1Alpha), // Starboard SARJ
    ("S0000004", AngleChannel::Group2Alpha), // Port SARJ
];

/// Channel driven by a telemetry item, if any
pub fn channel_for_item(item_id: &str) -> Option<AngleChannel> {
    TELEMETRY_ITEMS
        .iter()
        .find(|(id, _)| *id == item_id)
        .map(|(_, channel)| *channel)
}

/// Telemetry item that drives a channel
pub fn item_for_channel(channel: AngleChannel) -> &'static str {
    TELEMETRY_ITEMS[channel.slot()].0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_follow_slot_order() {
        for (slot, (_, channel)) in TELEMETRY_ITEMS.iter().enumerate() {
            assert_eq!(channel.slot(), slot);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(channel_for_item("S0000004"), Some(AngleChannel::Group2Alpha));
        assert_eq!(channel_for_item("P4000008"), None); // BGA 2 is not mirrored
        assert_eq!(item_for_channel(AngleChannel::Panel3Beta), "S4000007");
    }
}
