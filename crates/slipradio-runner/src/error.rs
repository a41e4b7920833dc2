//! Runner error types.

use std::io;

use slipradio_node::NodeError;
use slipradio_protocol::ProtocolError;
use thiserror::Error;

/// Errors raised while configuring or serving a simulated node.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Link address is not 8 bytes of hex.
    #[error("invalid link address {0:?}")]
    InvalidAddress(String),

    /// The node thread exited while the bridge was still running.
    #[error("node thread stopped")]
    NodeStopped,
}
