//! Telemetry mirror
//!
//! Keeps the latest reading of each mirrored item and decides when a new
//! command has to go out: whenever a mirrored value changes, and once more
//! each time the link comes up.

use mimic_protocol::ANGLE_COUNT;

use super::channel_for_item;
use crate::command::{AngleChannel, AngleCommand};

/// One reading from the telemetry feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryReading<'a> {
    /// Item identifier (e.g. "S0000004")
    pub item_id: &'a str,
    /// Raw text value as published
    pub value: &'a str,
}

/// Parse a published value; anything unparsable counts as 0
fn parse_value(value: &str) -> f32 {
    match value.trim().parse::<f32>() {
        Ok(degrees) if degrees.is_finite() => degrees,
        _ => 0.0,
    }
}

/// Latest mirrored angles and change detection
#[derive(Debug, Clone, Default)]
pub struct TelemetryMirror {
    values: [f32; ANGLE_COUNT],
    /// Values in the last command handed out
    sent: Option<[f32; ANGLE_COUNT]>,
    was_connected: bool,
}

impl TelemetryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading
    ///
    /// Returns the channel it updated, or `None` for items that are not
    /// mirrored.
    pub fn record(&mut self, reading: TelemetryReading<'_>) -> Option<AngleChannel> {
        let channel = channel_for_item(reading.item_id)?;
        self.values[channel.slot()] = parse_value(reading.value);
        Some(channel)
    }

    /// Latest mirrored angles
    pub fn command(&self) -> AngleCommand {
        AngleCommand::from_degrees(self.values)
    }

    /// Command to send now, if any
    ///
    /// Yields a command when values changed since the last one handed out,
    /// or when the link has just connected. Nothing is produced while
    /// disconnected.
    pub fn poll(&mut self, connected: bool) -> Option<AngleCommand> {
        let just_connected = connected && !self.was_connected;
        self.was_connected = connected;

        if !connected {
            return None;
        }

        if just_connected || self.sent != Some(self.values) {
            self.sent = Some(self.values);
            return Some(self.command());
        }
        None
    }

    /// Force the next connected poll to yield a command
    pub fn invalidate(&mut self) {
        self.sent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading<'a>(item_id: &'a str, value: &'a str) -> TelemetryReading<'a> {
        TelemetryReading { item_id, value }
    }

    #[test]
    fn test_record_maps_items() {
        let mut mirror = TelemetryMirror::new();
        assert_eq!(
            mirror.record(reading("S0000003", "123.5")),
            Some(AngleChannel::Group1Alpha)
        );
        assert_eq!(mirror.record(reading("NODE3000005", "42")), None);
        assert_eq!(
            mirror.command().get(AngleChannel::Group1Alpha),
            Some(123.5)
        );
    }

    #[test]
    fn test_unparsable_value_is_zero() {
        let mut mirror = TelemetryMirror::new();
        mirror.record(reading("P4000007", "45"));
        mirror.record(reading("P4000007", "n/a"));
        assert_eq!(mirror.command().get(AngleChannel::Panel1Beta), Some(0.0));
    }

    #[test]
    fn test_poll_only_on_change() {
        let mut mirror = TelemetryMirror::new();
        mirror.record(reading("S6000007", "270"));

        let command = mirror.poll(true).unwrap();
        assert_eq!(command.get(AngleChannel::Panel4Beta), Some(270.0));
        assert!(mirror.poll(true).is_none());

        mirror.record(reading("S6000007", "270"));
        assert!(mirror.poll(true).is_none());

        mirror.record(reading("S6000007", "271"));
        assert!(mirror.poll(true).is_some());
    }

    #[test]
    fn test_poll_resends_on_reconnect() {
        let mut mirror = TelemetryMirror::new();
        mirror.record(reading("S0000004", "10"));
        assert!(mirror.poll(true).is_some());

        assert!(mirror.poll(false).is_none());
        assert!(mirror.poll(true).is_some());
        assert!(mirror.poll(true).is_none());
    }

    #[test]
    fn test_nothing_while_disconnected() {
        let mut mirror = TelemetryMirror::new();
        mirror.record(reading("S0000004", "10"));
        assert!(mirror.poll(false).is_none());
    }

    #[test]
    fn test_invalidate_forces_resend() {
        let mut mirror = TelemetryMirror::new();
        mirror.record(reading("P6000007", "15"));
        assert!(mirror.poll(true).is_some());
        assert!(mirror.poll(true).is_none());

        mirror.invalidate();
        assert!(mirror.poll(true).is_some());
    }
}
