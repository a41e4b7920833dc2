//! Packet identifier ring.
//!
//! The host tags every `!S` command with a one-byte identifier and expects it
//! back in the send-status reply. The node remembers the identifiers of the
//! last [`PACKET_ID_SLOTS`] sends; the slot index travels with the packet
//! through the network stack as its correlation token.

use slipradio_protocol::PACKET_ID_SLOTS;

/// Correlation token for one submitted packet: the index of its ring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotToken(u8);

impl SlotToken {
    /// Token for slot `index`. Returns `None` when out of range.
    pub fn new(index: usize) -> Option<Self> {
        (index < PACKET_ID_SLOTS).then_some(SlotToken(index as u8))
    }

    /// The slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed ring of packet identifiers plus a cursor.
///
/// More than [`PACKET_ID_SLOTS`] sends in flight will overwrite slots whose
/// completion has not arrived yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketIdRing {
    slots: [u8; PACKET_ID_SLOTS],
    cursor: usize,
}

impl PacketIdRing {
    /// Create an empty ring with the cursor at slot 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot the next claim will use.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Store `packet_id` in the current slot and advance the cursor.
    pub fn claim_next(&mut self, packet_id: u8) -> SlotToken {
        let token = SlotToken(self.cursor as u8);
        self.slots[self.cursor] = packet_id;
        self.cursor = (self.cursor + 1) % PACKET_ID_SLOTS;
        token
    }

    /// Undo the most recent claim so its slot is handed out again.
    ///
    /// Only the latest claim can be released; returns whether the cursor moved.
    /// The identifier the claim wrote stays in the slot, so an in-flight packet
    /// from 16 claims earlier has already lost its identifier.
    pub fn release_slot(&mut self, token: SlotToken) -> bool {
        if (token.index() + 1) % PACKET_ID_SLOTS == self.cursor {
            self.cursor = token.index();
            true
        } else {
            false
        }
    }

    /// Identifier stored in the token's slot.
    pub fn packet_id(&self, token: SlotToken) -> u8 {
        self.slots[token.index()]
    }

    /// All slots, in index order.
    pub fn slots(&self) -> &[u8; PACKET_ID_SLOTS] {
        &self.slots
    }
}
