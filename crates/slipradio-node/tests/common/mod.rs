//! Recording collaborators shared by the node integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use slipradio_node::{
    Board, CompletionSender, FrameSink, NetworkStack, NodeConfig, PacketBuffer, SlipRadio,
    SlotToken, StackDrivers, StackError, TransportError,
};
use slipradio_protocol::{LinkAddress, PacketAttributes, SendStatus};

pub const TEST_ADDRESS: LinkAddress = LinkAddress([0x02, 0x12, 0x4b, 0x00, 0x06, 0x0d, 0x9f, 0x31]);

/// Transport that keeps every frame it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<u8>>,
    pub fail: bool,
}

impl FrameSink for RecordingSink {
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Closed);
        }
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

/// Board with a fixed address that counts reset requests.
#[derive(Debug)]
pub struct MockBoard {
    pub address: LinkAddress,
    pub resets: usize,
}

impl Default for MockBoard {
    fn default() -> Self {
        MockBoard {
            address: TEST_ADDRESS,
            resets: 0,
        }
    }
}

impl Board for MockBoard {
    fn link_address(&self) -> LinkAddress {
        self.address
    }

    fn request_reset(&mut self) {
        self.resets += 1;
    }
}

/// A packet as the stack saw it at send time.
#[derive(Debug, Clone)]
pub struct SentPacket {
    pub payload: Vec<u8>,
    pub attributes: PacketAttributes,
    pub token: SlotToken,
    pub completions: CompletionSender,
}

/// Everything the mock stack observed. Shared with the test body.
#[derive(Debug, Default)]
pub struct StackLog {
    pub parses: usize,
    pub sends: Vec<SentPacket>,
}

/// Network stack that records sends and optionally completes them at once.
#[derive(Debug, Default)]
pub struct MockStack {
    pub log: Arc<Mutex<StackLog>>,
    pub drivers: StackDrivers,
    pub auto_complete: Option<(SendStatus, u8)>,
    pub fail_parse: bool,
}

impl MockStack {
    pub fn new() -> (Self, Arc<Mutex<StackLog>>) {
        let stack = MockStack::default();
        let log = Arc::clone(&stack.log);
        (stack, log)
    }

    pub fn completing(status: SendStatus, transmissions: u8) -> (Self, Arc<Mutex<StackLog>>) {
        let (mut stack, log) = Self::new();
        stack.auto_complete = Some((status, transmissions));
        (stack, log)
    }
}

impl NetworkStack for MockStack {
    fn parse_frame(&mut self, _packet: &mut PacketBuffer) -> Result<(), StackError> {
        self.log.lock().unwrap().parses += 1;
        if self.fail_parse {
            return Err(StackError::Parse("no destination".to_string()));
        }
        Ok(())
    }

    fn send(&mut self, packet: &PacketBuffer, token: SlotToken, completions: CompletionSender) {
        if let Some((status, tx)) = self.auto_complete {
            completions.complete(token, status, tx);
        }
        self.log.lock().unwrap().sends.push(SentPacket {
            payload: packet.payload().to_vec(),
            attributes: packet.attributes().clone(),
            token,
            completions,
        });
    }

    fn drivers_mut(&mut self) -> &mut StackDrivers {
        &mut self.drivers
    }
}

pub type TestRadio = SlipRadio<RecordingSink, MockBoard, MockStack>;

/// Node with no stack attached.
pub fn radio_without_stack(config: NodeConfig) -> TestRadio {
    SlipRadio::new(config, RecordingSink::default(), MockBoard::default()).unwrap()
}

/// Node with a recording stack attached.
pub fn radio_with_stack(config: NodeConfig, stack: MockStack) -> TestRadio {
    let mut radio = radio_without_stack(config);
    radio.attach_stack(stack).unwrap();
    radio
}

/// Build a `!S` frame from raw attribute bytes and payload.
pub fn send_frame(packet_id: u8, attrs: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![b'!', b'S', packet_id];
    frame.extend_from_slice(attrs);
    frame.extend_from_slice(payload);
    frame
}
