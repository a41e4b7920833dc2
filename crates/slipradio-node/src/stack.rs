//! Network stack seam.
//!
//! The node does not route or frame packets itself. It stages the packet and
//! hands it to a [`NetworkStack`], which later reports the outcome through a
//! [`CompletionSender`]. Completions are queued on a channel and drained by the
//! node's dispatch loop, so they never race a command that is being handled.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use slipradio_protocol::SendStatus;

use crate::error::{NodeError, StackError};
use crate::packet::PacketBuffer;
use crate::ring::SlotToken;

// ============================================================================
// Completions
// ============================================================================

/// Outcome of one submitted packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendCompletion {
    /// Token handed to [`NetworkStack::send`].
    pub token: SlotToken,
    /// Link-layer status.
    pub status: SendStatus,
    /// Number of transmission attempts.
    pub transmissions: u8,
}

/// Handle a network stack uses to report finished sends.
#[derive(Debug, Clone)]
pub struct CompletionSender {
    tx: Sender<SendCompletion>,
}

impl CompletionSender {
    pub(crate) fn new(tx: Sender<SendCompletion>) -> Self {
        CompletionSender { tx }
    }

    /// Report that the packet behind `token` is done.
    ///
    /// Returns `false` if the node has shut down.
    pub fn complete(&self, token: SlotToken, status: SendStatus, transmissions: u8) -> bool {
        self.tx
            .send(SendCompletion {
                token,
                status,
                transmissions,
            })
            .is_ok()
    }
}

// ============================================================================
// Network Stack
// ============================================================================

/// The parts of a network stack the node drives.
pub trait NetworkStack {
    /// Resolve addressing for the staged packet. May update its attributes.
    fn parse_frame(&mut self, packet: &mut PacketBuffer) -> Result<(), StackError>;

    /// Transmit the staged packet.
    ///
    /// The stack must eventually call [`CompletionSender::complete`] with
    /// `token`; it may do so before returning.
    fn send(&mut self, packet: &PacketBuffer, token: SlotToken, completions: CompletionSender);

    /// Drivers currently installed in the stack.
    fn drivers_mut(&mut self) -> &mut StackDrivers;
}

// ============================================================================
// Driver Profile
// ============================================================================

/// Driver names installed at each layer of a network stack.
///
/// `None` means the layer has not been configured yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackDrivers {
    /// Header compression driver.
    pub header_compression: Option<String>,
    /// Link-layer framer.
    pub framer: Option<String>,
    /// Link-layer security driver.
    pub dll_security: Option<String>,
    /// Link-layer controller.
    pub dll_controller: Option<String>,
}

impl StackDrivers {
    /// Whether any layer has a driver installed.
    pub fn is_configured(&self) -> bool {
        self.header_compression.is_some()
            || self.framer.is_some()
            || self.dll_security.is_some()
            || self.dll_controller.is_some()
    }
}

/// The driver set a node needs to run as a serial bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackProfile {
    /// Header compression driver.
    pub header_compression: &'static str,
    /// Link-layer framer.
    pub framer: &'static str,
    /// Link-layer security driver.
    pub dll_security: &'static str,
    /// Link-layer controller.
    pub dll_controller: &'static str,
}

/// Packets arrive fully formed from the host: no compression beyond the SLIP
/// network driver, no framing, no link-layer security or control.
pub const SLIP_RADIO_PROFILE: StackProfile = StackProfile {
    header_compression: "slipnet",
    framer: "noframer",
    dll_security: "null",
    dll_controller: "null",
};

impl StackProfile {
    /// Install this profile on an unconfigured stack, or check that a
    /// configured stack already matches it.
    pub fn configure(&self, drivers: &mut StackDrivers) -> Result<(), NodeError> {
        if !drivers.is_configured() {
            drivers.header_compression = Some(self.header_compression.to_string());
            drivers.framer = Some(self.framer.to_string());
            drivers.dll_security = Some(self.dll_security.to_string());
            drivers.dll_controller = Some(self.dll_controller.to_string());
            return Ok(());
        }

        let layers = [
            ("header compression", self.header_compression, &drivers.header_compression),
            ("framer", self.framer, &drivers.framer),
            ("dll security", self.dll_security, &drivers.dll_security),
            ("dll controller", self.dll_controller, &drivers.dll_controller),
        ];
        for (layer, expected, found) in layers {
            if found.as_deref() != Some(expected) {
                return Err(NodeError::StackProfileMismatch {
                    layer,
                    expected,
                    found: found.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_profile_installs_on_unconfigured_stack() {
        let mut drivers = StackDrivers::default();
        SLIP_RADIO_PROFILE.configure(&mut drivers).unwrap();
        assert_eq!(drivers.framer.as_deref(), Some("noframer"));
        assert_eq!(drivers.header_compression.as_deref(), Some("slipnet"));

        // Configuring again is a no-op
        let before = drivers.clone();
        SLIP_RADIO_PROFILE.configure(&mut drivers).unwrap();
        assert_eq!(drivers, before);
    }

    #[test]
    fn test_profile_rejects_foreign_drivers() {
        let mut drivers = StackDrivers::default();
        SLIP_RADIO_PROFILE.configure(&mut drivers).unwrap();
        drivers.dll_security = Some("aes-ccm".to_string());

        let err = SLIP_RADIO_PROFILE.configure(&mut drivers).unwrap_err();
        match err {
            NodeError::StackProfileMismatch { layer, found, .. } => {
                assert_eq!(layer, "dll security");
                assert_eq!(found.as_deref(), Some("aes-ccm"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_partially_configured_stack_is_a_mismatch() {
        let mut drivers = StackDrivers {
            framer: Some("noframer".to_string()),
            ..Default::default()
        };
        assert!(SLIP_RADIO_PROFILE.configure(&mut drivers).is_err());
    }

    #[test]
    fn test_completion_sender_reports_closed_node() {
        let (tx, rx) = unbounded();
        let sender = CompletionSender::new(tx);
        let token = SlotToken::new(3).unwrap();

        assert!(sender.complete(token, SendStatus::Ok, 1));
        assert_eq!(rx.recv().unwrap().token, token);

        drop(rx);
        assert!(!sender.complete(token, SendStatus::Ok, 1));
    }
}
