//! Replies sent by the node.

use bytes::{BufMut, BytesMut};

use crate::constants::*;
use crate::error::*;
use crate::types::*;

/// Replies emitted by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Outcome of a packet previously submitted with `!S`.
    SendStatus {
        /// Identifier the host gave the packet.
        packet_id: u8,
        /// Link-layer status.
        status: SendStatus,
        /// Number of transmission attempts.
        transmissions: u8,
    },

    /// The node's link-layer hardware address.
    HardwareAddress(LinkAddress),
}

impl Reply {
    /// Exact encoded length of this reply.
    pub fn encoded_len(&self) -> usize {
        match self {
            Reply::SendStatus { .. } => SEND_STATUS_REPLY_LEN,
            Reply::HardwareAddress(_) => ADDRESS_REPLY_LEN,
        }
    }

    /// Append the encoded reply to `buf`, field by field.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        match self {
            Reply::SendStatus {
                packet_id,
                status,
                transmissions,
            } => {
                buf.put_u8(MARKER_COMMAND);
                buf.put_u8(SUBMARKER_SEND_STATUS);
                buf.put_u8(*packet_id);
                buf.put_u8((*status).into());
                buf.put_u8(*transmissions);
            }
            Reply::HardwareAddress(addr) => {
                buf.put_u8(MARKER_COMMAND);
                buf.put_u8(SUBMARKER_ADDRESS);
                buf.put_slice(addr.as_bytes());
            }
        }
    }

    /// Encode the reply to bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.to_vec()
    }

    /// Decode a reply frame.
    pub fn decode(frame: &[u8]) -> Result<Reply, ProtocolError> {
        if frame.len() < MARKER_LEN {
            return Err(ProtocolError::FrameTooShort {
                expected: MARKER_LEN,
                actual: frame.len(),
            });
        }

        match (frame[0], frame[1]) {
            (MARKER_COMMAND, SUBMARKER_SEND_STATUS) => {
                if frame.len() != SEND_STATUS_REPLY_LEN {
                    return Err(ProtocolError::BadLength {
                        kind: "send status",
                        expected: SEND_STATUS_REPLY_LEN,
                        actual: frame.len(),
                    });
                }
                Ok(Reply::SendStatus {
                    packet_id: frame[2],
                    status: SendStatus::from(frame[3]),
                    transmissions: frame[4],
                })
            }

            (MARKER_COMMAND, SUBMARKER_ADDRESS) => {
                let addr = LinkAddress::from_slice(&frame[MARKER_LEN..]).ok_or(
                    ProtocolError::BadLength {
                        kind: "hardware address",
                        expected: ADDRESS_REPLY_LEN,
                        actual: frame.len(),
                    },
                )?;
                Ok(Reply::HardwareAddress(addr))
            }

            _ => Err(ProtocolError::UnknownMarker(frame[..MARKER_LEN].to_vec())),
        }
    }
}
