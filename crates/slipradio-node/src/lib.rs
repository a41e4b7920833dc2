//! # slipradio-node
//!
//! Command dispatch core of a SLIP-radio node: a network node that transmits
//! radio packets for a host on the other end of a serial link.
//!
//! The node sits between three collaborators, each behind a trait:
//!
//! - a [`FrameSink`] transport that carries whole frames back to the host,
//! - a [`NetworkStack`] that parses and transmits staged packets,
//! - a [`Board`] that knows the hardware address and can reset the node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slipradio_node::{NodeConfig, SlipRadio};
//!
//! let mut radio = SlipRadio::new(NodeConfig::default(), uart, board)?;
//! radio.attach_stack(stack)?;
//!
//! // Handle frames and completions on one thread
//! radio.run(frames_rx);
//! ```

mod config;
mod error;
mod handler;
mod packet;
mod platform;
mod radio;
mod ring;
mod stack;

pub use config::{NodeConfig, SlotPolicy};
pub use error::{NodeError, StackError, TransportError};
pub use handler::{CommandHandler, Dispatch};
pub use packet::PacketBuffer;
pub use platform::{Board, FrameSink};
pub use radio::SlipRadio;
pub use ring::{PacketIdRing, SlotToken};
pub use stack::{
    CompletionSender, NetworkStack, SendCompletion, StackDrivers, StackProfile, SLIP_RADIO_PROFILE,
};
