//! Telemetry notifications from the replica
//!
//! The replica publishes short ASCII text on its telemetry characteristic,
//! at most 8 bytes per notification. The firmware currently reports its
//! battery voltage this way.

use core::fmt::Write;

use heapless::String;

/// Maximum telemetry notification length
pub const MAX_TELEMETRY_LEN: usize = 8;

/// Errors from telemetry parsing or formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Notification contains non-ASCII bytes
    NotAscii,
    /// Formatted value does not fit in a notification
    TooLong,
}

impl core::fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TelemetryError::NotAscii => write!(f, "telemetry notification is not ASCII"),
            TelemetryError::TooLong => {
                write!(f, "telemetry text exceeds {} bytes", MAX_TELEMETRY_LEN)
            }
        }
    }
}

/// Text carried by one telemetry notification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TelemetryReport {
    text: String<MAX_TELEMETRY_LEN>,
}

impl TelemetryReport {
    /// Parse a raw notification
    ///
    /// Only the first 8 bytes are considered, matching what the replica
    /// can send in one notification.
    pub fn from_notification(data: &[u8]) -> Result<Self, TelemetryError> {
        let data = &data[..data.len().min(MAX_TELEMETRY_LEN)];
        if !data.is_ascii() {
            return Err(TelemetryError::NotAscii);
        }

        let mut text = String::new();
        for &byte in data {
            // Capacity was checked above
            let _ = text.push(byte as char);
        }
        Ok(Self { text })
    }

    /// Build a battery voltage report (two decimals)
    pub fn battery(voltage: f32) -> Result<Self, TelemetryError> {
        let mut text = String::new();
        write!(text, "{:.2}", voltage).map_err(|_| TelemetryError::TooLong)?;
        Ok(Self { text })
    }

    /// Report text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Notification bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Leading numeric value interpreted as a battery voltage
    pub fn battery_voltage(&self) -> Option<f32> {
        let text = self.text.trim();
        let end = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
            .unwrap_or(text.len());
        text[..end].parse().ok()
    }
}
