//! Simulated replica controller

use mimic_protocol::{
    AnglePacket, PacketError, PacketVersion, RobotPacket, TelemetryError, TelemetryReport,
};

use super::servo::fold_to_servo;
use crate::command::requests_apply;
use crate::config::{MimicConfig, MAX_SERVOS};
use crate::traits::Transport;

/// Packet counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReplicaStats {
    /// Packets decoded successfully
    pub accepted: u32,
    /// Packets refused by the decoder
    pub rejected: u32,
    /// Accepted packets in the legacy layout
    pub legacy: u32,
}

/// Replica that applies the latest packet it receives
///
/// Like the firmware it has no ordering requirements: each packet fully
/// describes the commanded pose, and only the newest one counts.
#[derive(Debug, Clone)]
pub struct SimulatedReplica {
    config: MimicConfig,
    connected: bool,
    servos: [Option<u8>; MAX_SERVOS],
    latest: Option<RobotPacket>,
    last_error: Option<PacketError>,
    stats: ReplicaStats,
    battery_voltage: f32,
}

impl Default for SimulatedReplica {
    fn default() -> Self {
        Self::new(MimicConfig::new())
    }
}

impl SimulatedReplica {
    /// Create a disconnected replica
    pub fn new(config: MimicConfig) -> Self {
        let mut replica = Self {
            config,
            connected: false,
            servos: [None; MAX_SERVOS],
            latest: None,
            last_error: None,
            stats: ReplicaStats::default(),
            battery_voltage: 7.4,
        };
        replica.park();
        replica
    }

    /// Open the link
    pub fn connect(&mut self) {
        info!("Replica connected");
        self.connected = true;
    }

    /// Close the link; servo 0 returns to its parking angle
    pub fn disconnect(&mut self) {
        info!("Replica disconnected");
        self.connected = false;
        self.park();
    }

    fn park(&mut self) {
        self.servos[0] = Some(self.config.idle_servo_deg);
    }

    /// Feed one raw packet to the replica
    pub fn receive(&mut self, data: &[u8]) -> Result<PacketVersion, PacketError> {
        let packet = match RobotPacket::decode(data) {
            Ok(packet) => packet,
            Err(e) => {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                self.last_error = Some(e);
                debug!("Replica rejected {} byte packet", data.len());
                return Err(e);
            }
        };

        self.stats.accepted = self.stats.accepted.wrapping_add(1);
        match &packet {
            RobotPacket::V2SixAngle(angles) => self.apply(angles),
            RobotPacket::V1Legacy(_) => {
                // Axis packets carry no joint angles; nothing to drive
                self.stats.legacy = self.stats.legacy.wrapping_add(1);
            }
        }

        self.latest = Some(packet);
        Ok(packet.version())
    }

    fn apply(&mut self, packet: &AnglePacket) {
        for map in &self.config.servos {
            let angle = packet.angles[map.channel.slot()];
            // Out-of-range angles leave the servo where it was
            if let Some(servo_deg) = fold_to_servo(angle) {
                if let Some(slot) = self.servos.get_mut(map.servo as usize) {
                    *slot = Some(servo_deg);
                }
            }
        }
        trace!("Replica applied angles {:?}", packet.angles);
    }

    /// Current angle of a servo output, `None` if never driven
    pub fn servo(&self, index: usize) -> Option<u8> {
        self.servos.get(index).copied().flatten()
    }

    /// Most recent accepted packet
    pub fn latest(&self) -> Option<&RobotPacket> {
        self.latest.as_ref()
    }

    /// Whether the latest packet asked for its angles to be applied
    pub fn apply_requested(&self) -> bool {
        match &self.latest {
            Some(RobotPacket::V2SixAngle(packet)) => requests_apply(&packet.buttons),
            _ => false,
        }
    }

    /// Most recent decode failure
    pub fn last_error(&self) -> Option<PacketError> {
        self.last_error
    }

    pub fn stats(&self) -> ReplicaStats {
        self.stats
    }

    /// Set the simulated battery voltage
    pub fn set_battery_voltage(&mut self, voltage: f32) {
        self.battery_voltage = voltage;
    }

    /// Telemetry notification the replica would publish now
    pub fn telemetry(&self) -> Result<TelemetryReport, TelemetryError> {
        TelemetryReport::battery(self.battery_voltage)
    }
}

impl Transport for SimulatedReplica {
    type Error = PacketError;

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn write_packet(&mut self, packet: &[u8]) -> Result<(), Self::Error> {
        self.receive(packet).map(|_| ())
    }
}
