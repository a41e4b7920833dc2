//! Runs a simulated node on its own thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use slipradio_node::{Board, FrameSink, SlipRadio, TransportError};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::sim::{LoopbackStack, SimBoard};

/// Transport that hands reply frames to the async side.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        ChannelSink { tx }
    }
}

impl FrameSink for ChannelSink {
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.tx.send(frame.to_vec()).map_err(|_| TransportError::Closed)
    }
}

/// A simulated node as seen by the TCP side.
pub struct NodeThreadHandle {
    /// Frames for the node.
    frames: Sender<Vec<u8>>,
    /// Replies from the node.
    pub replies: mpsc::UnboundedReceiver<Vec<u8>>,
    name: String,
    thread: JoinHandle<usize>,
}

impl NodeThreadHandle {
    /// Queue a frame for dispatch.
    pub fn send(&self, frame: Vec<u8>) -> Result<(), RunnerError> {
        self.frames.send(frame).map_err(|_| RunnerError::NodeStopped)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the node thread has finished.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Close the frame channel and wait for the node to drain. Returns the
    /// number of resets the node requested.
    pub fn shutdown(self) -> Result<usize, RunnerError> {
        drop(self.frames);
        self.thread.join().map_err(|_| RunnerError::NodeStopped)
    }
}

/// Build the node described by `config` and start its dispatch loop.
pub fn spawn_node_thread(config: &RunnerConfig) -> Result<NodeThreadHandle, RunnerError> {
    config.validate()?;
    let (frames_tx, frames_rx) = crossbeam_channel::unbounded();
    let (replies_tx, replies_rx) = mpsc::unbounded_channel();

    let board = SimBoard::new(config.board.link_address()?);
    let stack = LoopbackStack::new(&config.loopback, config.stack.clone());
    let mut radio = SlipRadio::new(config.node.clone(), ChannelSink::new(replies_tx), board)?;
    radio.attach_stack(stack)?;

    let name = config.node.name.clone();
    let thread = thread::Builder::new()
        .name(format!("node-{}", name))
        .spawn(move || {
            info!(node = %radio.config().name, address = %radio.board().link_address(), "node started");
            radio.run(frames_rx);
            let sent = radio.stack().map(LoopbackStack::sent).unwrap_or(0);
            info!(node = %radio.config().name, sent, "node stopped");
            radio.board().resets()
        })?;

    Ok(NodeThreadHandle {
        frames: frames_tx,
        replies: replies_rx,
        name,
        thread,
    })
}
