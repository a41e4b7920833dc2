//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when working with the SLIP-radio protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is too short to be valid.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame is too long.
    #[error("frame too long: maximum {max} bytes, got {actual}")]
    FrameTooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame length does not match the fixed length of its kind.
    #[error("bad frame length for {kind}: expected {expected} bytes, got {actual}")]
    BadLength {
        /// Frame kind.
        kind: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Leading bytes do not name a known command or reply.
    #[error("unknown marker: {0:?}")]
    UnknownMarker(Vec<u8>),

    /// Attribute region could not be decoded.
    #[error("malformed attributes: {0}")]
    Attributes(#[from] AttributeError),
}

/// Errors raised by the attribute codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeError {
    /// The attribute region ended before the declared entries.
    #[error("attribute list truncated: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the declared count requires.
        needed: usize,
        /// Bytes present.
        available: usize,
    },

    /// More entries declared than there are attribute tags.
    #[error("too many attributes: {count} (max {max})")]
    TooMany {
        /// Declared entry count.
        count: usize,
        /// Number of known attribute tags.
        max: usize,
    },

    /// Entry uses a tag outside the attribute table.
    #[error("unknown attribute tag {tag} at offset {offset}")]
    UnknownTag {
        /// Offending tag.
        tag: u8,
        /// Offset of the entry within the attribute region.
        offset: usize,
    },

    /// Destination buffer cannot hold the encoded list.
    #[error("attribute buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes the encoded list requires.
        needed: usize,
        /// Bytes available.
        available: usize,
    },
}
