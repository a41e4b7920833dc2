//! Transport and hardware seams.

use slipradio_protocol::LinkAddress;

use crate::error::TransportError;

/// The serial transport, seen from the node: it accepts whole frames.
///
/// Framing and byte escaping happen behind this trait.
pub trait FrameSink {
    /// Send one complete frame to the host.
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;
}

impl<T: FrameSink + ?Sized> FrameSink for Box<T> {
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        (**self).send_frame(frame)
    }
}

/// Board services the node needs.
pub trait Board {
    /// The node's current link-layer hardware address.
    fn link_address(&self) -> LinkAddress;

    /// Reset the node.
    ///
    /// On hardware this does not return. Simulated boards may return, in which
    /// case the node carries on as if the reset already happened.
    fn request_reset(&mut self);
}
