//! Packet attribute codec.
//!
//! Attributes travel in front of the payload of a `!S` command as a counted
//! list of fixed-size entries:
//!
//! ```text
//! +-------+-----+--------+--------+-----+--------+--------+-----
//! | count | tag | val_hi | val_lo | tag | val_hi | val_lo | ...
//! +-------+-----+--------+--------+-----+--------+--------+-----
//! ```
//!
//! Values are 16-bit big-endian. The count may not exceed [`ATTRIBUTE_COUNT`]
//! and every tag must name a known [`PacketAttribute`].

use crate::constants::ATTRIBUTE_ENTRY_SIZE;
use crate::error::AttributeError;
use crate::types::{PacketAttribute, PacketAttributes, ATTRIBUTE_COUNT};

/// An ordered list of decoded attribute entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<(PacketAttribute, u16)>,
}

impl AttributeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// A list holds at most [`ATTRIBUTE_COUNT`] entries, the most the count
    /// byte may announce.
    pub fn push(&mut self, attr: PacketAttribute, value: u16) -> Result<(), AttributeError> {
        if self.entries.len() == ATTRIBUTE_COUNT {
            return Err(AttributeError::TooMany {
                count: self.entries.len() + 1,
                max: ATTRIBUTE_COUNT,
            });
        }
        self.entries.push((attr, value));
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &(PacketAttribute, u16)> {
        self.entries.iter()
    }

    /// Size of this list once encoded.
    pub fn encoded_len(&self) -> usize {
        1 + self.entries.len() * ATTRIBUTE_ENTRY_SIZE
    }

    /// Decode a list from the start of `data`.
    ///
    /// Returns the list and the number of bytes it occupied. Nothing is
    /// returned for a malformed region, not even the entries before the fault.
    pub fn decode(data: &[u8]) -> Result<(Self, usize), AttributeError> {
        let count = *data.first().ok_or(AttributeError::Truncated {
            needed: 1,
            available: 0,
        })? as usize;

        if count > ATTRIBUTE_COUNT {
            return Err(AttributeError::TooMany {
                count,
                max: ATTRIBUTE_COUNT,
            });
        }

        let needed = 1 + count * ATTRIBUTE_ENTRY_SIZE;
        if data.len() < needed {
            return Err(AttributeError::Truncated {
                needed,
                available: data.len(),
            });
        }

        let mut entries = Vec::with_capacity(count);
        for (i, entry) in data[1..needed].chunks_exact(ATTRIBUTE_ENTRY_SIZE).enumerate() {
            let tag = entry[0];
            let attr = PacketAttribute::from_tag(tag).ok_or(AttributeError::UnknownTag {
                tag,
                offset: 1 + i * ATTRIBUTE_ENTRY_SIZE,
            })?;
            let value = u16::from_be_bytes([entry[1], entry[2]]);
            entries.push((attr, value));
        }

        Ok((AttributeList { entries }, needed))
    }

    /// Append the encoded list to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.push(self.entries.len() as u8);
        for &(attr, value) in &self.entries {
            buf.push(attr.tag());
            buf.extend_from_slice(&value.to_be_bytes());
        }
    }

    /// Write every entry into an attribute store.
    pub fn apply_to(&self, store: &mut PacketAttributes) {
        for &(attr, value) in &self.entries {
            store.set(attr, value);
        }
    }
}

impl From<&PacketAttributes> for AttributeList {
    fn from(store: &PacketAttributes) -> Self {
        AttributeList {
            entries: store.iter().collect(),
        }
    }
}

/// Decode the attribute region of an outgoing packet into `store`.
///
/// On success returns how many bytes of `data` the list consumed, so the
/// caller can locate the payload. The store is only touched once the whole
/// list has decoded; on error it is left exactly as it was.
pub fn decode_attributes(data: &[u8], store: &mut PacketAttributes) -> Result<usize, AttributeError> {
    let (list, consumed) = AttributeList::decode(data)?;
    log::trace!("decoded {} packet attributes ({} bytes)", list.len(), consumed);
    list.apply_to(store);
    Ok(consumed)
}

/// Encode every set attribute of `store` into `out`.
///
/// Returns the number of bytes written.
pub fn encode_attributes(store: &PacketAttributes, out: &mut [u8]) -> Result<usize, AttributeError> {
    let list = AttributeList::from(store);
    let needed = list.encoded_len();
    if out.len() < needed {
        return Err(AttributeError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    out[0] = list.len() as u8;
    let mut pos = 1;
    for &(attr, value) in list.iter() {
        out[pos] = attr.tag();
        out[pos + 1..pos + 3].copy_from_slice(&value.to_be_bytes());
        pos += ATTRIBUTE_ENTRY_SIZE;
    }
    Ok(pos)
}
