//! Control session
//!
//! Owns the command link and both command sources. Exactly one source is
//! active at a time; the caller feeds it time, telemetry readings and
//! notifications from the replica.

use log::{debug, info, warn};
use mimic_core::command::{reset, AngleCommand, CommandError};
use mimic_core::config::MimicConfig;
use mimic_core::control::{pump_telemetry, JointSelection, ManualControl};
use mimic_core::link::{CommandLink, LinkError, SendOutcome};
use mimic_core::telemetry::{TelemetryMirror, TelemetryReading};
use mimic_core::traits::Transport;
use mimic_protocol::TelemetryReport;

/// Which source drives the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Operator-set targets, animated
    Manual,
    /// Angles mirrored from the ISS telemetry feed
    Live,
}

/// A running control session
#[derive(Debug)]
pub struct MimicSession<T: Transport> {
    link: CommandLink<T>,
    manual: ManualControl,
    mirror: TelemetryMirror,
    mode: ControlMode,
    battery_voltage: Option<f32>,
}

impl<T: Transport> MimicSession<T> {
    /// Start a session in manual mode
    pub fn new(config: &MimicConfig, transport: T) -> Self {
        info!(
            "Session started for {} ({} ms ticks)",
            config.device_name.as_str(),
            config.animation.interval_ms
        );
        Self {
            link: CommandLink::new(transport),
            manual: ManualControl::new(&config.animation),
            mirror: TelemetryMirror::new(),
            mode: ControlMode::Manual,
            battery_voltage: None,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Switch command source
    ///
    /// Entering live mode resends the mirrored angles on the next tick.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        info!("Control mode {:?} -> {:?}", self.mode, mode);
        if mode == ControlMode::Live {
            self.mirror.invalidate();
        }
        self.mode = mode;
    }

    /// Set a manual target; ignored by the replica until manual mode ticks
    pub fn set_target(&mut self, selection: JointSelection, degrees: f32) -> Result<(), CommandError> {
        self.manual.set_target(selection, degrees)
    }

    /// Return the selected joints to rest
    pub fn reset_joints(&mut self, selection: JointSelection) {
        self.manual.reset(selection);
    }

    /// Record one telemetry reading
    pub fn record_telemetry(&mut self, reading: TelemetryReading<'_>) {
        if self.mirror.record(reading).is_none() {
            debug!("Ignoring telemetry item {}", reading.item_id);
        }
    }

    /// Advance the active source and send whatever is due
    pub fn tick(&mut self, delta_ms: u32) -> Result<Option<SendOutcome>, LinkError<T::Error>> {
        match self.mode {
            ControlMode::Manual => self.manual.drive(&mut self.link, delta_ms),
            ControlMode::Live => pump_telemetry(&mut self.mirror, &mut self.link),
        }
    }

    /// Send every manual angle now
    pub fn send_all(&mut self) -> Result<SendOutcome, LinkError<T::Error>> {
        self.manual.send_all(&mut self.link)
    }

    /// Ask the replica to return to rest
    ///
    /// Sends the home pose with the reset button and moves manual control
    /// there too, so later ticks continue from rest.
    pub fn request_reset(&mut self) -> Result<SendOutcome, LinkError<T::Error>> {
        self.manual.jump_home(JointSelection::AllAlpha);
        self.manual.jump_home(JointSelection::AllBeta);
        self.link.send(&AngleCommand::home(), reset(), &[])
    }

    /// Handle a telemetry notification from the replica
    ///
    /// Returns the reported battery voltage when the text carries one.
    pub fn handle_notification(&mut self, data: &[u8]) -> Option<f32> {
        let report = match TelemetryReport::from_notification(data) {
            Ok(report) => report,
            Err(e) => {
                warn!("Bad notification: {}", e);
                return None;
            }
        };

        let voltage = report.battery_voltage();
        match voltage {
            Some(volts) => {
                debug!("Replica battery {:.2} V", volts);
                self.battery_voltage = Some(volts);
            }
            None => debug!("Replica says {:?}", report.as_str()),
        }
        voltage
    }

    /// Last battery voltage the replica reported
    pub fn battery_voltage(&self) -> Option<f32> {
        self.battery_voltage
    }

    pub fn link(&self) -> &CommandLink<T> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut CommandLink<T> {
        &mut self.link
    }
}
