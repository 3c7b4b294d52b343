//! Live telemetry mirroring

use crate::command::apply_angles;
use crate::link::{CommandLink, LinkError, SendOutcome};
use crate::telemetry::TelemetryMirror;
use crate::traits::Transport;

/// Send the mirrored angles if they changed or the link just came up
pub fn pump_telemetry<T: Transport>(
    mirror: &mut TelemetryMirror,
    link: &mut CommandLink<T>,
) -> Result<Option<SendOutcome>, LinkError<T::Error>> {
    match mirror.poll(link.is_connected()) {
        Some(command) => link.send(&command, apply_angles(), &[]).map(Some),
        None => Ok(None),
    }
}
