//! Error types for the node core.

use thiserror::Error;

/// Errors raised while configuring or wiring up a node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The network stack already runs drivers the bridge cannot work with.
    #[error("stack {layer} driver is {found:?}, bridge requires {expected:?}")]
    StackProfileMismatch {
        /// Stack layer that disagrees.
        layer: &'static str,
        /// Driver the bridge needs.
        expected: &'static str,
        /// Driver currently installed.
        found: Option<String>,
    },
}

/// Errors reported by the frame transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The far end is gone.
    #[error("transport closed")]
    Closed,

    /// The transport refused the frame.
    #[error("frame rejected: {0}")]
    Rejected(String),
}

/// Errors reported by the network stack.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StackError {
    /// Frame parsing could not resolve the packet's addressing.
    #[error("frame parse failed: {0}")]
    Parse(String),
}
