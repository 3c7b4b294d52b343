//! Configuration type definitions

use heapless::{String, Vec};

use crate::command::AngleChannel;
use crate::motion::{DEFAULT_INTERVAL_MS, DEFAULT_STEP_DEG};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum advertised device name length (BLE name budget)
pub const MAX_DEVICE_NAME_LEN: usize = 8;

/// Number of servo outputs on the replica controller
pub const MAX_SERVOS: usize = 4;

/// Name the replica advertises by default
pub const DEFAULT_DEVICE_NAME: &str = "IssMimic";

/// Servo angle the first servo parks at while no link is open
pub const DEFAULT_IDLE_SERVO_DEG: u8 = 70;

/// Largest angle a servo output accepts
pub const MAX_SERVO_DEG: u8 = 180;

/// Errors from configuration checks and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Device name is empty
    InvalidDeviceName,
    /// Animation step or interval is not positive
    InvalidAnimation,
    /// Servo index outside the controller's outputs
    ServoOutOfRange(u8),
    /// Same servo mapped twice
    DuplicateServo(u8),
    /// Idle servo angle above the servo range
    InvalidIdleAngle,
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Config version mismatch
    VersionMismatch,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidDeviceName => write!(f, "device name is empty"),
            ConfigError::InvalidAnimation => {
                write!(f, "animation step and interval must be positive")
            }
            ConfigError::ServoOutOfRange(servo) => {
                write!(f, "servo {} does not exist (0-{})", servo, MAX_SERVOS - 1)
            }
            ConfigError::DuplicateServo(servo) => write!(f, "servo {} is mapped twice", servo),
            ConfigError::InvalidIdleAngle => {
                write!(f, "idle servo angle exceeds {} degrees", MAX_SERVO_DEG)
            }
            ConfigError::Serialize => write!(f, "config serialization failed"),
            ConfigError::Deserialize => write!(f, "config deserialization failed"),
            ConfigError::VersionMismatch => write!(f, "config version mismatch"),
        }
    }
}

/// Animation timing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// Maximum movement per tick (degrees)
    pub step_deg: f32,
    /// Tick interval (milliseconds)
    pub interval_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_deg: DEFAULT_STEP_DEG,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// Which channel drives which servo output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoMap {
    /// Servo output index (0-3)
    pub servo: u8,
    /// Channel whose angle drives it
    pub channel: AngleChannel,
}

/// Replica and control configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MimicConfig {
    /// Advertised BLE name
    pub device_name: String<MAX_DEVICE_NAME_LEN>,
    /// Animation timing for manual control
    pub animation: AnimationConfig,
    /// Servo wiring
    pub servos: Vec<ServoMap, MAX_SERVOS>,
    /// Parking angle of servo 0 while disconnected
    pub idle_servo_deg: u8,
}

impl Default for MimicConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MimicConfig {
    /// Configuration matching the stock replica build
    ///
    /// Servos 0-2 follow panels 1-3; servo 3 follows the group 1 alpha joint.
    pub fn new() -> Self {
        let mut device_name = String::new();
        let _ = device_name.push_str(DEFAULT_DEVICE_NAME);

        let mut servos = Vec::new();
        for (servo, channel) in [
            AngleChannel::Panel1Beta,
            AngleChannel::Panel2Beta,
            AngleChannel::Panel3Beta,
            AngleChannel::Group1Alpha,
        ]
        .into_iter()
        .enumerate()
        {
            let _ = servos.push(ServoMap {
                servo: servo as u8,
                channel,
            });
        }

        Self {
            device_name,
            animation: AnimationConfig::default(),
            servos,
            idle_servo_deg: DEFAULT_IDLE_SERVO_DEG,
        }
    }

    /// Check value ranges that the type system does not cover
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_name.is_empty() {
            return Err(ConfigError::InvalidDeviceName);
        }

        if !(self.animation.step_deg > 0.0 && self.animation.step_deg.is_finite())
            || self.animation.interval_ms == 0
        {
            return Err(ConfigError::InvalidAnimation);
        }

        let mut seen = [false; MAX_SERVOS];
        for map in &self.servos {
            let index = map.servo as usize;
            if index >= MAX_SERVOS {
                return Err(ConfigError::ServoOutOfRange(map.servo));
            }
            if seen[index] {
                return Err(ConfigError::DuplicateServo(map.servo));
            }
            seen[index] = true;
        }

        if self.idle_servo_deg > MAX_SERVO_DEG {
            return Err(ConfigError::InvalidIdleAngle);
        }

        Ok(())
    }

    /// Channel driving a servo output, if mapped
    pub fn channel_for_servo(&self, servo: u8) -> Option<AngleChannel> {
        self.servos
            .iter()
            .find(|map| map.servo == servo)
            .map(|map| map.channel)
    }
}
