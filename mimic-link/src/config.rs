//! TOML configuration loading
//!
//! The file mirrors [`MimicConfig`] field for field. Every key is optional;
//! missing keys keep the stock replica values. Loaded configs are always
//! validated before they are handed out.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use mimic_core::config::{ConfigError, MimicConfig};

/// Errors from loading a configuration file
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read
    Io(io::Error),
    /// TOML syntax or shape error
    Parse(toml::de::Error),
    /// Values parsed but failed validation
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read config: {}", e),
            LoadError::Parse(e) => write!(f, "invalid config: {}", e),
            LoadError::Invalid(e) => write!(f, "config rejected: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Parse and validate a configuration from TOML text
pub fn parse_config(input: &str) -> Result<MimicConfig, LoadError> {
    let config: MimicConfig = toml::from_str(input)?;
    config.validate()?;
    debug!(
        "Config parsed: {} servo mappings, {} ms ticks",
        config.servos.len(),
        config.animation.interval_ms
    );
    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<MimicConfig, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::command::AngleChannel;

    const SAMPLE: &str = include_str!("../mimic.toml");

    #[test]
    fn test_sample_matches_defaults() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config, MimicConfig::new());
    }

    #[test]
    fn test_empty_file_is_stock_config() {
        assert_eq!(parse_config("").unwrap(), MimicConfig::new());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            device_name = "Mimic2"

            [animation]
            step_deg = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.device_name.as_str(), "Mimic2");
        assert_eq!(config.animation.step_deg, 5.0);
        assert_eq!(config.animation.interval_ms, 50);
        assert_eq!(config.channel_for_servo(3), Some(AngleChannel::Group1Alpha));
    }

    #[test]
    fn test_custom_servo_wiring() {
        let config = parse_config(
            r#"
            [[servos]]
            servo = 0
            channel = "group2"
            "#,
        )
        .unwrap();
        assert_eq!(config.servos.len(), 1);
        assert_eq!(config.channel_for_servo(0), Some(AngleChannel::Group2Alpha));
        assert_eq!(config.channel_for_servo(1), None);
    }

    #[test]
    fn test_channels_use_short_names() {
        for channel in AngleChannel::ALL {
            let input = format!("[[servos]]\nservo = 0\nchannel = \"{}\"", channel.name());
            let config = parse_config(&input).unwrap();
            assert_eq!(config.channel_for_servo(0), Some(channel));
        }
    }

    #[test]
    fn test_validation_failure() {
        let result = parse_config(
            r#"
            [[servos]]
            servo = 2
            channel = "panel1"

            [[servos]]
            servo = 2
            channel = "panel2"
            "#,
        );
        assert!(matches!(
            result,
            Err(LoadError::Invalid(ConfigError::DuplicateServo(2)))
        ));
    }

    #[test]
    fn test_unknown_channel_is_parse_error() {
        let result = parse_config(
            r#"
            [[servos]]
            servo = 0
            channel = "panel9"
            "#,
        );
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_device_name_limits() {
        assert!(matches!(
            parse_config("device_name = \"\""),
            Err(LoadError::Invalid(ConfigError::InvalidDeviceName))
        ));
        // Nine bytes do not fit the advertised name buffer
        assert!(matches!(
            parse_config("device_name = \"IssMimic2\""),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            parse_config("device_name = "),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/mimic.toml");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("mimic-{}.toml", std::process::id()));
        fs::write(&path, "idle_servo_deg = 90\n").unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.idle_servo_deg, 90);
    }
}
