//! Protocol constants
//!
//! These constants define the frame markers, field offsets and size limits used
//! by the SLIP-radio serial command protocol.

// ============================================================================
// Frame Markers
// ============================================================================

/// Leading byte of commands that act on the node, and of all node replies.
pub const MARKER_COMMAND: u8 = b'!';
/// Leading byte of host requests that expect a reply.
pub const MARKER_REQUEST: u8 = b'?';

/// Submarker for an outgoing packet command (`!S`).
pub const SUBMARKER_SEND: u8 = b'S';
/// Submarker for a reboot command (`!R`).
pub const SUBMARKER_REBOOT: u8 = b'R';
/// Submarker for a send-status reply (`!R`). Shares the reboot byte.
pub const SUBMARKER_SEND_STATUS: u8 = b'R';
/// Submarker for an address query (`?M`) and its reply (`!M`).
pub const SUBMARKER_ADDRESS: u8 = b'M';

// ============================================================================
// Field Layout
// ============================================================================

/// Length of a bare two-byte command (`!R`, `?M`).
pub const MARKER_LEN: usize = 2;
/// Offset of the packet identifier byte in a `!S` command.
pub const PACKET_ID_OFFSET: usize = 2;
/// Length of the `!S` header: marker, submarker, packet identifier.
pub const SEND_HEADER_LEN: usize = 3;

/// Size of a link-layer hardware address.
pub const LINK_ADDRESS_SIZE: usize = 8;
/// Exact length of a send-status reply.
pub const SEND_STATUS_REPLY_LEN: usize = 5;
/// Exact length of a hardware address reply.
pub const ADDRESS_REPLY_LEN: usize = MARKER_LEN + LINK_ADDRESS_SIZE;

// ============================================================================
// Buffer Sizes
// ============================================================================

/// Default capacity of the outgoing payload buffer (one link-layer frame).
pub const DEFAULT_PAYLOAD_CAPACITY: usize = 128;

/// Size of one serialized attribute entry: tag + 16-bit value.
pub const ATTRIBUTE_ENTRY_SIZE: usize = 3;

/// Number of packet identifiers remembered for completion correlation.
pub const PACKET_ID_SLOTS: usize = 16;

// ============================================================================
// Send Status Codes
// ============================================================================

/// Transmission succeeded.
pub const TX_STATUS_OK: u8 = 0;
/// Transmission failed because of a collision.
pub const TX_STATUS_COLLISION: u8 = 1;
/// No acknowledgement was received.
pub const TX_STATUS_NOACK: u8 = 2;
/// Transmission was deferred by the MAC layer.
pub const TX_STATUS_DEFERRED: u8 = 3;
/// Transient error, the packet may be retried.
pub const TX_STATUS_ERR: u8 = 4;
/// Fatal error, the packet should not be retried.
pub const TX_STATUS_ERR_FATAL: u8 = 5;
