//! Common types used in the protocol.

use crate::constants::*;
use std::fmt;

// ============================================================================
// Link Address
// ============================================================================

/// An 8-byte link-layer hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinkAddress(pub [u8; LINK_ADDRESS_SIZE]);

impl LinkAddress {
    /// Create a new address from bytes.
    pub fn new(bytes: [u8; LINK_ADDRESS_SIZE]) -> Self {
        LinkAddress(bytes)
    }

    /// Create from a slice. Returns None if slice is wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == LINK_ADDRESS_SIZE {
            let mut bytes = [0u8; LINK_ADDRESS_SIZE];
            bytes.copy_from_slice(slice);
            Some(LinkAddress(bytes))
        } else {
            None
        }
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; LINK_ADDRESS_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for LinkAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for LinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

// ============================================================================
// Send Status
// ============================================================================

/// Outcome of a link-layer transmission, as reported in a `!R` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SendStatus {
    /// Transmission succeeded.
    Ok,
    /// Collision on the medium.
    Collision,
    /// No acknowledgement received.
    NoAck,
    /// Deferred by the MAC layer.
    Deferred,
    /// Transient error.
    Err,
    /// Fatal error.
    ErrFatal,
    /// Status code this crate does not know.
    Unknown(u8),
}

impl SendStatus {
    /// Short lowercase name, used for log fields and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            SendStatus::Ok => "ok",
            SendStatus::Collision => "collision",
            SendStatus::NoAck => "noack",
            SendStatus::Deferred => "deferred",
            SendStatus::Err => "err",
            SendStatus::ErrFatal => "err_fatal",
            SendStatus::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendStatus::Unknown(code) => write!(f, "unknown (0x{:02X})", code),
            other => f.write_str(other.as_str()),
        }
    }
}

impl From<u8> for SendStatus {
    fn from(code: u8) -> Self {
        match code {
            TX_STATUS_OK => SendStatus::Ok,
            TX_STATUS_COLLISION => SendStatus::Collision,
            TX_STATUS_NOACK => SendStatus::NoAck,
            TX_STATUS_DEFERRED => SendStatus::Deferred,
            TX_STATUS_ERR => SendStatus::Err,
            TX_STATUS_ERR_FATAL => SendStatus::ErrFatal,
            _ => SendStatus::Unknown(code),
        }
    }
}

impl From<SendStatus> for u8 {
    fn from(status: SendStatus) -> Self {
        match status {
            SendStatus::Ok => TX_STATUS_OK,
            SendStatus::Collision => TX_STATUS_COLLISION,
            SendStatus::NoAck => TX_STATUS_NOACK,
            SendStatus::Deferred => TX_STATUS_DEFERRED,
            SendStatus::Err => TX_STATUS_ERR,
            SendStatus::ErrFatal => TX_STATUS_ERR_FATAL,
            SendStatus::Unknown(code) => code,
        }
    }
}

// ============================================================================
// Packet Attributes
// ============================================================================

/// Per-packet metadata tags understood by the node.
///
/// The discriminant is the tag byte used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PacketAttribute {
    None = 0,
    Channel = 1,
    NetworkId = 2,
    LinkQuality = 3,
    Rssi = 4,
    Timestamp = 5,
    RadioTxPower = 6,
    ListenTime = 7,
    TransmitTime = 8,
    MaxMacTransmissions = 9,
    MacSeqno = 10,
    MacAck = 11,
    IsCreatedAndSecured = 12,
    Reliable = 13,
    PacketId = 14,
    PacketType = 15,
    Rexmit = 16,
    MaxRexmit = 17,
    NumRexmit = 18,
    Pending = 19,
    FrameType = 20,
    SecurityLevel = 21,
    FrameCounterBytes0_1 = 22,
    FrameCounterBytes2_3 = 23,
    KeyIdMode = 24,
    KeyIndex = 25,
    KeySourceBytes0_1 = 26,
}

/// Number of known attribute tags. Valid tags are `0..ATTRIBUTE_COUNT`.
pub const ATTRIBUTE_COUNT: usize = 27;

impl PacketAttribute {
    /// Every attribute, in tag order.
    pub const ALL: [PacketAttribute; ATTRIBUTE_COUNT] = [
        PacketAttribute::None,
        PacketAttribute::Channel,
        PacketAttribute::NetworkId,
        PacketAttribute::LinkQuality,
        PacketAttribute::Rssi,
        PacketAttribute::Timestamp,
        PacketAttribute::RadioTxPower,
        PacketAttribute::ListenTime,
        PacketAttribute::TransmitTime,
        PacketAttribute::MaxMacTransmissions,
        PacketAttribute::MacSeqno,
        PacketAttribute::MacAck,
        PacketAttribute::IsCreatedAndSecured,
        PacketAttribute::Reliable,
        PacketAttribute::PacketId,
        PacketAttribute::PacketType,
        PacketAttribute::Rexmit,
        PacketAttribute::MaxRexmit,
        PacketAttribute::NumRexmit,
        PacketAttribute::Pending,
        PacketAttribute::FrameType,
        PacketAttribute::SecurityLevel,
        PacketAttribute::FrameCounterBytes0_1,
        PacketAttribute::FrameCounterBytes2_3,
        PacketAttribute::KeyIdMode,
        PacketAttribute::KeyIndex,
        PacketAttribute::KeySourceBytes0_1,
    ];

    /// Look up an attribute by its wire tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    /// The wire tag of this attribute.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Per-packet attribute store: one 16-bit value per attribute tag.
///
/// A value of zero means "unset"; the encoder skips zero entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketAttributes {
    values: [u16; ATTRIBUTE_COUNT],
}

impl Default for PacketAttributes {
    fn default() -> Self {
        PacketAttributes {
            values: [0u16; ATTRIBUTE_COUNT],
        }
    }
}

impl PacketAttributes {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute (zero if unset).
    pub fn get(&self, attr: PacketAttribute) -> u16 {
        self.values[attr as usize]
    }

    /// Set the value of an attribute.
    pub fn set(&mut self, attr: PacketAttribute, value: u16) {
        self.values[attr as usize] = value;
    }

    /// Reset every attribute to zero.
    pub fn clear(&mut self) {
        self.values = [0u16; ATTRIBUTE_COUNT];
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }

    /// Iterate over the attributes that are set, in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (PacketAttribute, u16)> + '_ {
        PacketAttribute::ALL
            .iter()
            .zip(self.values.iter())
            .filter(|(_, &value)| value != 0)
            .map(|(&attr, &value)| (attr, value))
    }
}
