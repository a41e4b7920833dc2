//! Outgoing packet staging buffer.

use slipradio_protocol::PacketAttributes;

/// Staging area for the packet currently being submitted: its attributes and
/// at most `capacity` bytes of payload.
#[derive(Debug, Clone)]
pub struct PacketBuffer {
    attributes: PacketAttributes,
    data: Vec<u8>,
    capacity: usize,
}

impl PacketBuffer {
    /// Create an empty buffer holding up to `capacity` payload bytes.
    pub fn new(capacity: usize) -> Self {
        PacketBuffer {
            attributes: PacketAttributes::new(),
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Drop the payload and reset every attribute.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.data.clear();
    }

    /// Copy `payload` in, truncated to the capacity.
    ///
    /// Returns the number of bytes staged.
    pub fn set_payload(&mut self, payload: &[u8]) -> usize {
        let len = payload.len().min(self.capacity);
        self.data.clear();
        self.data.extend_from_slice(&payload[..len]);
        len
    }

    /// Shorten the staged payload to `len` bytes. Longer values are ignored.
    pub fn set_len(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Staged payload.
    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    /// Staged payload length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no payload is staged.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum payload length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Packet attributes.
    pub fn attributes(&self) -> &PacketAttributes {
        &self.attributes
    }

    /// Mutable packet attributes.
    pub fn attributes_mut(&mut self) -> &mut PacketAttributes {
        &mut self.attributes
    }
}
