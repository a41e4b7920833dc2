//! SLIP-radio Serial Command Protocol
//!
//! This crate provides types and utilities for talking to a SLIP-radio node: a
//! network node that sits behind a serial link and transmits radio packets on
//! behalf of a host. Every message is a complete frame delivered by the serial
//! transport; the first one or two bytes identify what the frame carries.
//!
//! # Protocol Overview
//!
//! - **Commands** (host → node): `!S` send packet, `!R` reboot, `?M` address query
//! - **Replies** (node → host): `!R` send status, `!M` hardware address
//!
//! An outgoing packet command carries a packet identifier, a compact list of
//! packet attributes (see [`decode_attributes`]), and the raw payload.
//!
//! # Example
//!
//! ```rust
//! use slipradio_protocol::{Command, CommandKind, PacketAttribute, AttributeList};
//!
//! let mut attributes = AttributeList::new();
//! attributes.push(PacketAttribute::MaxMacTransmissions, 3).unwrap();
//!
//! let cmd = Command::SendPacket {
//!     packet_id: 7,
//!     attributes,
//!     payload: b"hello".to_vec(),
//! };
//! let frame = cmd.encode();
//! assert_eq!(CommandKind::classify(&frame), Some(CommandKind::SendPacket));
//! ```

mod attributes;
mod commands;
mod constants;
mod error;
mod frame;
mod responses;
mod types;

pub use attributes::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use responses::*;
pub use types::*;
