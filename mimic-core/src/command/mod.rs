//! Angle commands
//!
//! An [`AngleCommand`] is the logical intent for one outbound packet. It is
//! built fresh for every send and converted in one of two ways:
//!
//! - [`AngleCommand::to_packet`] is permissive: anything is clamped onto the
//!   wire, so noisy UI input never interrupts the control loop.
//! - [`AngleCommand::validate`] is strict: non-finite or out-of-range values
//!   are reported with the offending channel.

pub mod channel;

pub use channel::AngleChannel;

use mimic_protocol::{AnglePacket, ButtonByte, ButtonState, ANGLE_COUNT, MAX_ANGLE_DEG};

/// Button byte 0, bit 0: replica should move to the transmitted angles
pub const APPLY_ANGLES_BIT: u8 = 0;

/// Button byte 0, bit 1: replica should return to its rest position
pub const RESET_BIT: u8 = 1;

/// Buttons for an ordinary "move to these angles" command
pub fn apply_angles() -> ButtonState {
    ButtonState::new(1 << APPLY_ANGLES_BIT, 0)
}

/// Buttons for a reset command
pub fn reset() -> ButtonState {
    ButtonState::new(1 << RESET_BIT, 0)
}

/// Whether a button state requests the transmitted angles be applied
pub fn requests_apply(buttons: &ButtonState) -> bool {
    buttons.is_set(ButtonByte::First, APPLY_ANGLES_BIT).unwrap_or(false)
}

/// Validation failures from the strict command layer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Angle is NaN or infinite
    NonFinite { channel: AngleChannel },
    /// Angle lies outside 0-360 degrees
    OutOfRange { channel: AngleChannel, degrees: f32 },
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::NonFinite { channel } => {
                write!(f, "{} angle is not a finite number", channel.name())
            }
            CommandError::OutOfRange { channel, degrees } => write!(
                f,
                "{} angle {} is outside 0-{} degrees",
                channel.name(),
                degrees,
                MAX_ANGLE_DEG
            ),
        }
    }
}

/// Target angles for the six channels; unset channels transmit as 0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleCommand {
    angles: [Option<f32>; ANGLE_COUNT],
}

impl AngleCommand {
    /// Command with no channel set
    pub const fn new() -> Self {
        Self {
            angles: [None; ANGLE_COUNT],
        }
    }

    /// Command with every channel set, in slot order
    pub fn from_degrees(angles: [f32; ANGLE_COUNT]) -> Self {
        Self {
            angles: angles.map(Some),
        }
    }

    /// Every channel at its rest position
    pub fn home() -> Self {
        Self::from_degrees(AngleChannel::ALL.map(AngleChannel::home_deg))
    }

    /// Set one channel
    pub fn with(mut self, channel: AngleChannel, degrees: f32) -> Self {
        self.angles[channel.slot()] = Some(degrees);
        self
    }

    /// Angle of one channel, if set
    pub fn get(&self, channel: AngleChannel) -> Option<f32> {
        self.angles[channel.slot()]
    }

    /// Angle of one channel, 0 when unset
    pub fn degrees(&self, channel: AngleChannel) -> f32 {
        self.get(channel).unwrap_or(0.0)
    }

    /// Channels paired with their angles
    pub fn iter(&self) -> impl Iterator<Item = (AngleChannel, Option<f32>)> + '_ {
        AngleChannel::ALL
            .into_iter()
            .map(move |channel| (channel, self.get(channel)))
    }

    /// Permissive conversion to a wire packet
    pub fn to_packet(&self, buttons: ButtonState, key_codes: &[u8]) -> AnglePacket {
        AnglePacket::new()
            .with_angles(self.angles.map(|angle| angle.unwrap_or(0.0)))
            .with_buttons(buttons)
            .with_key_codes(key_codes)
    }

    /// Strict check that every set angle is finite and within 0-360
    pub fn validate(&self) -> Result<ValidatedCommand, CommandError> {
        let mut angles = [0u16; ANGLE_COUNT];
        for (channel, angle) in self.iter() {
            let degrees = match angle {
                Some(degrees) => degrees,
                None => continue,
            };
            if !degrees.is_finite() {
                return Err(CommandError::NonFinite { channel });
            }
            if !(0.0..=MAX_ANGLE_DEG as f32).contains(&degrees) {
                return Err(CommandError::OutOfRange { channel, degrees });
            }
            angles[channel.slot()] = degrees as u16;
        }
        Ok(ValidatedCommand { angles })
    }
}

/// A command whose angles are known to be in range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidatedCommand {
    angles: [u16; ANGLE_COUNT],
}

impl ValidatedCommand {
    /// Whole-degree angle of one channel
    pub fn degrees(&self, channel: AngleChannel) -> u16 {
        self.angles[channel.slot()]
    }

    /// Conversion to a wire packet; no clamping takes place
    pub fn to_packet(&self, buttons: ButtonState, key_codes: &[u8]) -> AnglePacket {
        AnglePacket::new()
            .with_angles(self.angles)
            .with_buttons(buttons)
            .with_key_codes(key_codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_channels_encode_as_zero() {
        let packet = AngleCommand::new()
            .with(AngleChannel::Panel2Beta, 45.0)
            .to_packet(ButtonState::default(), &[]);
        assert_eq!(packet.angles, [0, 45, 0, 0, 0, 0]);
    }

    #[test]
    fn test_named_channels_reach_their_slots() {
        let command = AngleCommand::new()
            .with(AngleChannel::Panel1Beta, 90.0)
            .with(AngleChannel::Panel4Beta, 360.0)
            .with(AngleChannel::Group1Alpha, 12.0)
            .with(AngleChannel::Group2Alpha, 270.0);
        let bytes = command.to_packet(apply_angles(), &[]).encode();

        assert_eq!(&bytes[1..3], &[90, 0]);
        assert_eq!(&bytes[7..9], &[104, 1]);
        assert_eq!(&bytes[9..11], &[12, 0]);
        assert_eq!(&bytes[11..13], &[14, 1]);
        assert_eq!(bytes[13], 1);
    }

    #[test]
    fn test_permissive_packet_clamps() {
        let command = AngleCommand::new()
            .with(AngleChannel::Panel1Beta, -1.0)
            .with(AngleChannel::Panel2Beta, 725.0)
            .with(AngleChannel::Panel3Beta, f32::NAN);
        let packet = command.to_packet(ButtonState::default(), &[]);
        assert_eq!(packet.angles[..3], [0, 360, 0]);
    }

    #[test]
    fn test_validate_accepts_range_edges() {
        let command = AngleCommand::new()
            .with(AngleChannel::Panel1Beta, 0.0)
            .with(AngleChannel::Group2Alpha, 360.0);
        let validated = command.validate().unwrap();
        assert_eq!(validated.degrees(AngleChannel::Group2Alpha), 360);
        assert_eq!(validated.degrees(AngleChannel::Panel2Beta), 0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let command = AngleCommand::new().with(AngleChannel::Group1Alpha, -1.0);
        assert_eq!(
            command.validate(),
            Err(CommandError::OutOfRange {
                channel: AngleChannel::Group1Alpha,
                degrees: -1.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let command = AngleCommand::new().with(AngleChannel::Panel3Beta, f32::INFINITY);
        assert_eq!(
            command.validate(),
            Err(CommandError::NonFinite {
                channel: AngleChannel::Panel3Beta
            })
        );
    }

    #[test]
    fn test_validated_packet_matches_permissive_for_valid_input() {
        let command = AngleCommand::from_degrees([90.0, 180.0, 270.0, 360.0, 0.0, 45.5]);
        let strict = command.validate().unwrap().to_packet(apply_angles(), &[]);
        let loose = command.to_packet(apply_angles(), &[]);
        assert_eq!(strict, loose);
    }

    #[test]
    fn test_button_helpers() {
        assert_eq!(apply_angles(), ButtonState::new(1, 0));
        assert_eq!(reset(), ButtonState::new(2, 0));
        assert!(requests_apply(&apply_angles()));
        assert!(!requests_apply(&reset()));
    }

    #[test]
    fn test_home_positions() {
        let home = AngleCommand::home();
        assert_eq!(home.get(AngleChannel::Panel1Beta), Some(90.0));
        assert_eq!(home.get(AngleChannel::Group2Alpha), Some(0.0));
    }
}
