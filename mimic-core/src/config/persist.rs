//! Binary persistence of [`MimicConfig`]
//!
//! Layout: one version byte followed by the postcard encoding.

#[cfg(feature = "serde")]
use super::types::{ConfigError, MimicConfig};

/// Version of the persisted layout
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the persisted size
pub const MAX_CONFIG_SIZE: usize = 128;

/// Serialize a configuration into `buffer`
///
/// Returns the number of bytes written
#[cfg(feature = "serde")]
pub fn config_to_bytes(config: &MimicConfig, buffer: &mut [u8]) -> Result<usize, ConfigError> {
    let (version, body) = buffer.split_first_mut().ok_or(ConfigError::Serialize)?;
    *version = CONFIG_VERSION;
    let used = postcard::to_slice(config, body).map_err(|_| ConfigError::Serialize)?;
    Ok(1 + used.len())
}

/// Deserialize and validate a configuration
#[cfg(feature = "serde")]
pub fn config_from_bytes(data: &[u8]) -> Result<MimicConfig, ConfigError> {
    let (version, body) = data.split_first().ok_or(ConfigError::Deserialize)?;
    if *version != CONFIG_VERSION {
        return Err(ConfigError::VersionMismatch);
    }
    let config: MimicConfig = postcard::from_bytes(body).map_err(|_| ConfigError::Deserialize)?;
    config.validate()?;
    Ok(config)
}
