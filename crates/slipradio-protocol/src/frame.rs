//! Length-prefixed frame codec for stream transports.
//!
//! The node itself never sees transport bytes; it is handed whole frames. When
//! the protocol runs over a plain byte stream (the simulator's TCP socket) each
//! frame is wrapped with a direction byte and a 2-byte little-endian length:
//!
//! ```text
//! +-----+--------+--------+-------------------+
//! | dir | len_lo | len_hi | data[0..len]      |
//! +-----+--------+--------+-------------------+
//! ```
//!
//! `dir` is `<` for host → node frames and `>` for node → host frames.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::ProtocolError;

/// Maximum frame size supported.
pub const MAX_FRAMED_SIZE: usize = 1024;

/// Direction byte of frames travelling host → node.
pub const HOST_TO_NODE: u8 = b'<';
/// Direction byte of frames travelling node → host.
pub const NODE_TO_HOST: u8 = b'>';

const FRAME_HEADER_LEN: usize = 3;

/// A codec for reading and writing framed messages.
#[derive(Debug)]
pub struct FrameCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// Direction byte accepted on decode.
    inbound: u8,
    /// Direction byte written on encode.
    outbound: u8,
}

impl FrameCodec {
    /// Codec for the node side: decodes `<` frames, encodes `>` frames.
    pub fn node_side() -> Self {
        Self::with_directions(HOST_TO_NODE, NODE_TO_HOST)
    }

    /// Codec for the host side: decodes `>` frames, encodes `<` frames.
    pub fn host_side() -> Self {
        Self::with_directions(NODE_TO_HOST, HOST_TO_NODE)
    }

    fn with_directions(inbound: u8, outbound: u8) -> Self {
        FrameCodec {
            buffer: BytesMut::with_capacity(MAX_FRAMED_SIZE),
            inbound,
            outbound,
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete frame from the buffer.
    ///
    /// Returns `Ok(Some(frame_data))` if a complete frame is available,
    /// `Ok(None)` if more data is needed. A declared length above
    /// [`MAX_FRAMED_SIZE`] is an error; the offending header is dropped so
    /// the codec can resynchronise on the next direction byte.
    pub fn decode(&mut self) -> Result<Option<Vec<u8>>, ProtocolError> {
        // Discard anything before the next direction byte
        while !self.buffer.is_empty() && self.buffer[0] != self.inbound {
            self.buffer.advance(1);
        }

        if self.buffer.len() < FRAME_HEADER_LEN {
            return Ok(None);
        }

        let len = u16::from_le_bytes([self.buffer[1], self.buffer[2]]) as usize;
        if len > MAX_FRAMED_SIZE {
            self.buffer.advance(1);
            return Err(ProtocolError::FrameTooLong {
                max: MAX_FRAMED_SIZE,
                actual: len,
            });
        }

        if self.buffer.len() < FRAME_HEADER_LEN + len {
            return Ok(None);
        }

        self.buffer.advance(FRAME_HEADER_LEN);
        Ok(Some(self.buffer.split_to(len).to_vec()))
    }

    /// Wrap `data` for transmission in this codec's outbound direction.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        if data.len() > MAX_FRAMED_SIZE {
            return Err(ProtocolError::FrameTooLong {
                max: MAX_FRAMED_SIZE,
                actual: data.len(),
            });
        }
        let mut buf = Vec::with_capacity(FRAME_HEADER_LEN + data.len());
        buf.push(self.outbound);
        buf.put_u16_le(data.len() as u16);
        buf.extend_from_slice(data);
        Ok(buf)
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
