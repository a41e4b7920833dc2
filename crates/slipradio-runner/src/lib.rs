//! # slipradio-runner
//!
//! Runs a simulated SLIP-radio node behind a TCP socket so host software can
//! be exercised without hardware. The node core runs unchanged on its own
//! thread with a [`SimBoard`] and a [`LoopbackStack`]; the [`BridgeServer`]
//! frames traffic between the socket and the node.

pub mod bridge;
pub mod config;
pub mod error;
pub mod node_thread;
pub mod sim;

pub use bridge::BridgeServer;
pub use config::{parse_link_address, BoardConfig, LoopbackConfig, RunnerConfig, ServerConfig};
pub use error::RunnerError;
pub use node_thread::{spawn_node_thread, ChannelSink, NodeThreadHandle};
pub use sim::{LoopbackStack, SimBoard};
