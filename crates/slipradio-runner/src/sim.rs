//! Simulated collaborators: a board with a fixed address and a network stack
//! that completes every send immediately.

use slipradio_node::{
    Board, CompletionSender, NetworkStack, PacketBuffer, SlotToken, StackDrivers, StackError,
};
use slipradio_protocol::{LinkAddress, SendStatus};
use tracing::{debug, info, trace};

use crate::config::LoopbackConfig;

// ============================================================================
// Board
// ============================================================================

/// Board with a configured hardware address. Resets are counted, not performed.
#[derive(Debug, Clone)]
pub struct SimBoard {
    address: LinkAddress,
    resets: usize,
}

impl SimBoard {
    pub fn new(address: LinkAddress) -> Self {
        SimBoard { address, resets: 0 }
    }

    /// Number of resets requested so far.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Board for SimBoard {
    fn link_address(&self) -> LinkAddress {
        self.address
    }

    fn request_reset(&mut self) {
        self.resets += 1;
        info!(address = %self.address, resets = self.resets, "simulated reset");
    }
}

// ============================================================================
// Network Stack
// ============================================================================

/// Network stack that reports every packet as sent with a fixed outcome.
#[derive(Debug, Clone)]
pub struct LoopbackStack {
    drivers: StackDrivers,
    status: SendStatus,
    transmissions: u8,
    sent: u64,
}

impl LoopbackStack {
    pub fn new(config: &LoopbackConfig, drivers: StackDrivers) -> Self {
        LoopbackStack {
            drivers,
            status: config.status(),
            transmissions: config.transmissions,
            sent: 0,
        }
    }

    /// Packets accepted so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl NetworkStack for LoopbackStack {
    fn parse_frame(&mut self, packet: &mut PacketBuffer) -> Result<(), StackError> {
        trace!(len = packet.len(), "loopback parse");
        Ok(())
    }

    fn send(&mut self, packet: &PacketBuffer, token: SlotToken, completions: CompletionSender) {
        self.sent += 1;
        trace!(slot = token.index(), len = packet.len(), "loopback send");
        if !completions.complete(token, self.status, self.transmissions) {
            debug!(slot = token.index(), "node gone, completion dropped");
        }
    }

    fn drivers_mut(&mut self) -> &mut StackDrivers {
        &mut self.drivers
    }
}
