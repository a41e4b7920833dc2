//! Commands that can be sent to the node.

use crate::attributes::AttributeList;
use crate::constants::*;
use crate::error::*;

/// The kind of command a frame carries, decided from its leading bytes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `!S <id> <attrs> <payload>`
    SendPacket,
    /// `!R`
    Reboot,
    /// `?M`
    AddressQuery,
}

impl CommandKind {
    /// Classify a frame.
    ///
    /// Markers are checked in a fixed order and every submarker must match
    /// exactly; anything else yields `None`. A `!S` frame needs at least the
    /// packet identifier byte, and `!R` / `?M` must be exactly two bytes.
    pub fn classify(frame: &[u8]) -> Option<CommandKind> {
        match frame {
            [MARKER_COMMAND, SUBMARKER_SEND, ..] if frame.len() >= SEND_HEADER_LEN => {
                Some(CommandKind::SendPacket)
            }
            [MARKER_COMMAND, SUBMARKER_REBOOT] => Some(CommandKind::Reboot),
            [MARKER_REQUEST, SUBMARKER_ADDRESS] => Some(CommandKind::AddressQuery),
            _ => None,
        }
    }

    /// Short lowercase name, used for log fields and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::SendPacket => "send",
            CommandKind::Reboot => "reboot",
            CommandKind::AddressQuery => "address_query",
        }
    }
}

/// Commands a host can send to the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Transmit a radio packet.
    SendPacket {
        /// Host-chosen identifier echoed in the send-status reply.
        packet_id: u8,
        /// Packet attributes applied before transmission.
        attributes: AttributeList,
        /// Link-layer payload.
        payload: Vec<u8>,
    },

    /// Reset the node.
    Reboot,

    /// Ask for the node's link-layer hardware address.
    AddressQuery,
}

impl Command {
    /// Get the kind of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SendPacket { .. } => CommandKind::SendPacket,
            Command::Reboot => CommandKind::Reboot,
            Command::AddressQuery => CommandKind::AddressQuery,
        }
    }

    /// Encode the command to bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::SendPacket {
                packet_id,
                attributes,
                payload,
            } => {
                let mut buf =
                    Vec::with_capacity(SEND_HEADER_LEN + attributes.encoded_len() + payload.len());
                buf.push(MARKER_COMMAND);
                buf.push(SUBMARKER_SEND);
                buf.push(*packet_id);
                attributes.encode_into(&mut buf);
                buf.extend_from_slice(payload);
                buf
            }

            Command::Reboot => vec![MARKER_COMMAND, SUBMARKER_REBOOT],

            Command::AddressQuery => vec![MARKER_REQUEST, SUBMARKER_ADDRESS],
        }
    }

    /// Decode a command frame.
    ///
    /// Unlike the node's dispatch path this never truncates: the payload is
    /// returned whole.
    pub fn decode(frame: &[u8]) -> Result<Command, ProtocolError> {
        match CommandKind::classify(frame) {
            Some(CommandKind::SendPacket) => {
                let packet_id = frame[PACKET_ID_OFFSET];
                let (attributes, consumed) = AttributeList::decode(&frame[SEND_HEADER_LEN..])?;
                let payload = frame[SEND_HEADER_LEN + consumed..].to_vec();
                Ok(Command::SendPacket {
                    packet_id,
                    attributes,
                    payload,
                })
            }
            Some(CommandKind::Reboot) => Ok(Command::Reboot),
            Some(CommandKind::AddressQuery) => Ok(Command::AddressQuery),
            None if frame.len() < MARKER_LEN => Err(ProtocolError::FrameTooShort {
                expected: MARKER_LEN,
                actual: frame.len(),
            }),
            None => Err(ProtocolError::UnknownMarker(frame[..MARKER_LEN].to_vec())),
        }
    }
}
