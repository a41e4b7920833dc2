//! TCP bridge.
//!
//! Exposes a simulated node on a TCP port. One client is served at a time;
//! bytes from the client are split into frames with a [`FrameCodec`] and
//! forwarded to the node thread, and replies from the node are framed and
//! written back.

use std::io;
use std::net::SocketAddr;

use slipradio_protocol::FrameCodec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, trace, warn};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::node_thread::{spawn_node_thread, NodeThreadHandle};

/// A TCP listener in front of one simulated node.
pub struct BridgeServer {
    listener: TcpListener,
    node: NodeThreadHandle,
}

impl BridgeServer {
    /// Start the node and bind the listener.
    pub async fn bind(config: &RunnerConfig) -> Result<Self, RunnerError> {
        let node = spawn_node_thread(config)?;
        let listener = TcpListener::bind(&config.server.bind).await?;
        info!(node = node.name(), addr = %listener.local_addr()?, "bridge listening");
        Ok(BridgeServer { listener, node })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept clients until the listener or the node fails.
    pub async fn serve(mut self) -> Result<(), RunnerError> {
        loop {
            let (stream, peer) = self.listener.accept().await?;

            // Replies nobody was connected to receive
            let mut stale = 0;
            while self.node.replies.try_recv().is_ok() {
                stale += 1;
            }
            info!(node = self.node.name(), %peer, stale, "client connected");

            match handle_connection(stream, &mut self.node).await {
                Ok(()) => info!(node = self.node.name(), %peer, "client disconnected"),
                Err(RunnerError::NodeStopped) => return Err(RunnerError::NodeStopped),
                Err(err) => warn!(node = self.node.name(), %peer, %err, "connection error"),
            }

            if self.node.is_finished() {
                return Err(RunnerError::NodeStopped);
            }
        }
    }

    /// Stop the node and return the number of resets it requested.
    pub fn shutdown(self) -> Result<usize, RunnerError> {
        self.node.shutdown()
    }
}

/// Serve one TCP client until it disconnects.
async fn handle_connection(
    mut stream: TcpStream,
    node: &mut NodeThreadHandle,
) -> Result<(), RunnerError> {
    let (mut reader, mut writer) = stream.split();
    let mut codec = FrameCodec::node_side();
    let mut read_buf = [0u8; 1024];

    loop {
        tokio::select! {
            // TCP client -> node
            result = reader.read(&mut read_buf) => {
                let n = result?;
                if n == 0 {
                    return Ok(());
                }
                codec.push(&read_buf[..n]);
                loop {
                    match codec.decode() {
                        Ok(Some(frame)) => {
                            trace!(len = frame.len(), "frame from host");
                            node.send(frame)?;
                        }
                        Ok(None) => break,
                        Err(err) => debug!(%err, "discarding bad frame header"),
                    }
                }
            }

            // node -> TCP client
            Some(reply) = node.replies.recv() => {
                let framed = codec.encode(&reply)?;
                writer.write_all(&framed).await?;
                writer.flush().await?;
            }
        }
    }
}
