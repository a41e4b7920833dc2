//! The SLIP-radio node: command dispatch, packet submission and replies.

use bytes::BytesMut;
use crossbeam_channel::{select, unbounded, Receiver, Sender};
use slipradio_metrics::{metric_defs, NodeLabels};
use slipradio_protocol::{
    decode_attributes, CommandKind, Reply, ADDRESS_REPLY_LEN, PACKET_ID_OFFSET, SEND_HEADER_LEN,
};
use tracing::{debug, trace, warn};

use crate::config::{NodeConfig, SlotPolicy};
use crate::error::NodeError;
use crate::handler::{CommandHandler, Dispatch};
use crate::packet::PacketBuffer;
use crate::platform::{Board, FrameSink};
use crate::ring::{PacketIdRing, SlotToken};
use crate::stack::{CompletionSender, NetworkStack, SendCompletion, SLIP_RADIO_PROFILE};

/// A SLIP-radio node.
///
/// Owns all mutable protocol state: the packet identifier ring, the outgoing
/// staging buffer and the reply buffer. Frames come in through
/// [`dispatch`](Self::dispatch); send completions come back over a channel and
/// are turned into replies by [`poll_completions`](Self::poll_completions) or
/// by the [`run`](Self::run) loop.
pub struct SlipRadio<T, B, S> {
    config: NodeConfig,
    labels: NodeLabels,
    transport: T,
    board: B,
    stack: Option<S>,
    ring: PacketIdRing,
    packet: PacketBuffer,
    reply: BytesMut,
    completions_tx: Sender<SendCompletion>,
    completions_rx: Receiver<SendCompletion>,
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl<T, B, S> SlipRadio<T, B, S>
where
    T: FrameSink,
    B: Board,
    S: NetworkStack,
{
    /// Create a node with no network stack attached.
    pub fn new(config: NodeConfig, transport: T, board: B) -> Result<Self, NodeError> {
        config.validate()?;
        let (completions_tx, completions_rx) = unbounded();
        Ok(SlipRadio {
            labels: NodeLabels::new(config.name.clone()),
            packet: PacketBuffer::new(config.payload_capacity),
            reply: BytesMut::with_capacity(ADDRESS_REPLY_LEN),
            config,
            transport,
            board,
            stack: None,
            ring: PacketIdRing::new(),
            completions_tx,
            completions_rx,
            handlers: Vec::new(),
        })
    }

    /// Attach a network stack, installing the bridge driver profile on it.
    ///
    /// Fails if the stack is already configured with other drivers; the node
    /// then keeps running without a stack.
    pub fn attach_stack(&mut self, mut stack: S) -> Result<(), NodeError> {
        SLIP_RADIO_PROFILE.configure(stack.drivers_mut())?;
        self.stack = Some(stack);
        Ok(())
    }

    /// Detach and return the network stack.
    pub fn detach_stack(&mut self) -> Option<S> {
        self.stack.take()
    }

    /// Register an extra handler for frames the node does not recognise.
    pub fn add_handler(&mut self, handler: impl CommandHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Handle one decoded frame.
    pub fn dispatch(&mut self, frame: &[u8]) -> Dispatch {
        let Some(kind) = CommandKind::classify(frame) else {
            return self.dispatch_extensions(frame);
        };

        metrics::counter!(
            metric_defs::CMD_FRAMES.name,
            &self.labels.with(&[("command", kind.as_str().to_string())])
        )
        .increment(1);

        match kind {
            CommandKind::SendPacket => self.handle_send(frame),
            CommandKind::Reboot => self.handle_reboot(),
            CommandKind::AddressQuery => self.handle_address_query(),
        }
        Dispatch::Handled
    }

    fn dispatch_extensions(&mut self, frame: &[u8]) -> Dispatch {
        for handler in &mut self.handlers {
            if handler.handle(frame, &mut self.transport).is_handled() {
                return Dispatch::Handled;
            }
        }
        metrics::counter!(metric_defs::CMD_UNHANDLED.name, &self.labels.to_labels()).increment(1);
        Dispatch::Unhandled
    }

    // ========================================================================
    // Outgoing Packets
    // ========================================================================

    fn handle_send(&mut self, frame: &[u8]) {
        let packet_id = frame[PACKET_ID_OFFSET];
        let token = self.ring.claim_next(packet_id);

        self.packet.clear();
        let consumed = match decode_attributes(&frame[SEND_HEADER_LEN..], self.packet.attributes_mut()) {
            Ok(consumed) => consumed,
            Err(err) => {
                warn!(node = %self.config.name, packet_id, %err, "illegal packet attributes");
                metrics::counter!(metric_defs::TX_MALFORMED_ATTRIBUTES.name, &self.labels.to_labels())
                    .increment(1);
                self.release_unsubmitted(token);
                return;
            }
        };

        let payload = &frame[SEND_HEADER_LEN + consumed..];
        let staged = self.packet.set_payload(payload);
        if staged < payload.len() {
            debug!(
                node = %self.config.name,
                packet_id,
                len = payload.len(),
                capacity = self.packet.capacity(),
                "payload truncated"
            );
            metrics::counter!(metric_defs::TX_PAYLOAD_TRUNCATED.name, &self.labels.to_labels())
                .increment(1);
        }
        metrics::histogram!(metric_defs::TX_PAYLOAD_SIZE.name, &self.labels.to_labels())
            .record(staged as f64);

        if let Some(stack) = self.stack.as_mut() {
            // Addressing comes out of the parse step; a failure leaves the
            // attributes as the host sent them.
            if let Err(err) = stack.parse_frame(&mut self.packet) {
                debug!(node = %self.config.name, packet_id, %err, "frame parse failed");
            }
            debug!(node = %self.config.name, packet_id, slot = token.index(), len = staged, "sending");
            stack.send(&self.packet, token, CompletionSender::new(self.completions_tx.clone()));
            metrics::counter!(metric_defs::TX_SUBMITTED.name, &self.labels.to_labels()).increment(1);
            return;
        }

        warn!(node = %self.config.name, packet_id, "no network stack attached, packet dropped");
        metrics::counter!(metric_defs::TX_STACK_UNAVAILABLE.name, &self.labels.to_labels())
            .increment(1);
        self.release_unsubmitted(token);
    }

    fn release_unsubmitted(&mut self, token: SlotToken) {
        if self.config.slot_policy == SlotPolicy::ReleaseUnsubmitted {
            self.ring.release_slot(token);
        }
    }

    // ========================================================================
    // Send Completions
    // ========================================================================

    /// Emit the send-status reply for a finished packet.
    pub fn notify_sent(&mut self, completion: SendCompletion) {
        let packet_id = self.ring.packet_id(completion.token);
        debug!(
            node = %self.config.name,
            packet_id,
            status = %completion.status,
            tx = completion.transmissions,
            "packet sent"
        );
        metrics::counter!(
            metric_defs::TX_COMPLETED.name,
            &self.labels.with(&[("status", completion.status.as_str().to_string())])
        )
        .increment(1);
        metrics::histogram!(metric_defs::TX_TRANSMISSIONS.name, &self.labels.to_labels())
            .record(completion.transmissions as f64);

        self.send_reply(Reply::SendStatus {
            packet_id,
            status: completion.status,
            transmissions: completion.transmissions,
        });
    }

    /// Turn every queued completion into a reply. Returns how many there were.
    pub fn poll_completions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.notify_sent(completion);
            count += 1;
        }
        count
    }

    // ========================================================================
    // Query and Control
    // ========================================================================

    fn handle_address_query(&mut self) {
        let addr = self.board.link_address();
        trace!(node = %self.config.name, %addr, "address query");
        metrics::counter!(metric_defs::NODE_ADDRESS_QUERIES.name, &self.labels.to_labels())
            .increment(1);
        self.send_reply(Reply::HardwareAddress(addr));
    }

    fn handle_reboot(&mut self) {
        warn!(node = %self.config.name, "rebooting");
        metrics::counter!(metric_defs::NODE_REBOOTS.name, &self.labels.to_labels()).increment(1);
        self.board.request_reset();
    }

    /// Build `reply` in the reply buffer, hand it to the transport, and mark
    /// the buffer consumed.
    fn send_reply(&mut self, reply: Reply) {
        self.reply.clear();
        reply.encode_into(&mut self.reply);
        if let Err(err) = self.transport.send_frame(&self.reply) {
            warn!(node = %self.config.name, %err, "reply not sent");
            metrics::counter!(metric_defs::NODE_REPLY_FAILURES.name, &self.labels.to_labels())
                .increment(1);
        }
        self.reply.clear();
    }

    // ========================================================================
    // Event Loop
    // ========================================================================

    /// Dispatch frames from `frames` and replies for finished sends until the
    /// frame channel closes. Completions still queued at that point are
    /// flushed before returning.
    pub fn run(&mut self, frames: Receiver<Vec<u8>>) {
        let completions = self.completions_rx.clone();
        loop {
            select! {
                recv(frames) -> msg => match msg {
                    Ok(frame) => {
                        if !self.dispatch(&frame).is_handled() {
                            debug!(node = %self.config.name, len = frame.len(), "unhandled frame");
                        }
                    }
                    Err(_) => break,
                },
                recv(completions) -> msg => {
                    if let Ok(completion) = msg {
                        self.notify_sent(completion);
                    }
                }
            }
        }
        let flushed = self.poll_completions();
        debug!(node = %self.config.name, flushed, "frame channel closed");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Node configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Packet identifier ring.
    pub fn ring(&self) -> &PacketIdRing {
        &self.ring
    }

    /// Outgoing staging buffer.
    pub fn packet(&self) -> &PacketBuffer {
        &self.packet
    }

    /// Reply buffer. Always empty between dispatch calls.
    pub fn reply_buffer(&self) -> &[u8] {
        &self.reply
    }

    /// Attached network stack.
    pub fn stack(&self) -> Option<&S> {
        self.stack.as_ref()
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The board.
    pub fn board(&self) -> &B {
        &self.board
    }
}
