//! Command link implementation

use mimic_protocol::{ButtonState, RobotPacket};

use crate::command::{AngleCommand, ValidatedCommand};
use crate::traits::Transport;

/// What happened to a packet handed to the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// Packet written to the transport
    Sent,
    /// Link was down; packet dropped
    Skipped,
}

/// Errors surfaced by the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError<E> {
    /// Transport rejected the write
    Transport(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for LinkError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkError::Transport(e) => write!(f, "transport write failed: {:?}", e),
        }
    }
}

/// Packet counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub sent: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Encodes commands and writes them to a transport when connected
#[derive(Debug)]
pub struct CommandLink<T: Transport> {
    transport: T,
    stats: LinkStats,
}

impl<T: Transport> CommandLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            stats: LinkStats::default(),
        }
    }

    /// Check whether packets would currently be delivered
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Send a command; angles are clamped onto the wire
    pub fn send(
        &mut self,
        command: &AngleCommand,
        buttons: ButtonState,
        key_codes: &[u8],
    ) -> Result<SendOutcome, LinkError<T::Error>> {
        let packet = command.to_packet(buttons, key_codes);
        self.send_packet(&RobotPacket::V2SixAngle(packet))
    }

    /// Send a command that already passed strict validation
    pub fn send_validated(
        &mut self,
        command: &ValidatedCommand,
        buttons: ButtonState,
        key_codes: &[u8],
    ) -> Result<SendOutcome, LinkError<T::Error>> {
        let packet = command.to_packet(buttons, key_codes);
        self.send_packet(&RobotPacket::V2SixAngle(packet))
    }

    /// Send a packet of any layout
    pub fn send_packet(&mut self, packet: &RobotPacket) -> Result<SendOutcome, LinkError<T::Error>> {
        if !self.transport.is_connected() {
            self.stats.skipped = self.stats.skipped.wrapping_add(1);
            trace!("Link down, packet dropped");
            return Ok(SendOutcome::Skipped);
        }

        let bytes = packet.encode_to_vec();
        match self.transport.write_packet(&bytes) {
            Ok(()) => {
                self.stats.sent = self.stats.sent.wrapping_add(1);
                trace!("Sent {} byte packet", bytes.len());
                Ok(SendOutcome::Sent)
            }
            Err(e) => {
                self.stats.failed = self.stats.failed.wrapping_add(1);
                warn!("Packet write failed ({} failures so far)", self.stats.failed);
                Err(LinkError::Transport(e))
            }
        }
    }

    /// Packet counters since creation
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably (e.g. to connect or disconnect)
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the link and return the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}
