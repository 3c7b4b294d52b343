//! Transport trait
//!
//! A transport delivers opaque, fixed-length packets to the replica. It
//! knows nothing of packet contents; connection state lives here so the
//! codec stays pure.

/// Byte-delivery channel to the replica
pub trait Transport {
    /// Error type for write operations
    type Error: core::fmt::Debug;

    /// Check whether the link can currently accept packets
    fn is_connected(&self) -> bool;

    /// Write one complete packet
    ///
    /// Implementations must deliver the packet as a single unit or not at
    /// all; partial writes are reported as errors.
    fn write_packet(&mut self, packet: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn write_packet(&mut self, packet: &[u8]) -> Result<(), Self::Error> {
        (**self).write_packet(packet)
    }
}
