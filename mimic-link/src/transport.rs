//! Byte-stream transport
//!
//! Wraps any [`embedded_io::Write`] sink (serial port, socket, BLE bridge)
//! and adds the connection flag the command link gates on.

use embedded_io::Write;
use log::{info, trace, warn};
use mimic_core::traits::Transport;

/// Transport over a blocking byte writer
#[derive(Debug)]
pub struct IoTransport<W> {
    writer: W,
    connected: bool,
}

impl<W: Write> IoTransport<W> {
    /// Create a transport; it starts disconnected
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            connected: false,
        }
    }

    /// Mark the link as up
    pub fn connect(&mut self) {
        if !self.connected {
            info!("Link connected");
        }
        self.connected = true;
    }

    /// Mark the link as down
    pub fn disconnect(&mut self) {
        if self.connected {
            info!("Link disconnected");
        }
        self.connected = false;
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for IoTransport<W> {
    type Error = W::Error;

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn write_packet(&mut self, packet: &[u8]) -> Result<(), Self::Error> {
        if let Err(e) = self.writer.write_all(packet) {
            warn!("Failed to write packet: {:?}", e);
            return Err(e);
        }
        self.writer.flush()?;
        trace!("Wrote {} bytes", packet.len());
        Ok(())
    }
}
