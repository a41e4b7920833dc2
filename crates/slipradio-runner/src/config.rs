//! Simulator configuration.
//!
//! Loaded from YAML; every section and field is optional:
//!
//! ```yaml
//! node:
//!   name: radio-1
//!   payload_capacity: 128
//!   slot_policy: release_unsubmitted
//! server:
//!   bind: 127.0.0.1:4500
//! board:
//!   link_address: "02:12:4b:00:06:0d:9f:31"
//! loopback:
//!   status: 0
//!   transmissions: 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use slipradio_node::{NodeConfig, StackDrivers};
use slipradio_protocol::{LinkAddress, SendStatus};

use crate::error::RunnerError;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub node: NodeConfig,
    pub server: ServerConfig,
    pub board: BoardConfig,
    pub loopback: LoopbackConfig,
    /// Drivers already installed in the simulated stack.
    pub stack: StackDrivers,
}

/// TCP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:4500".to_string(),
        }
    }
}

/// Simulated board settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Hardware address as hex, with or without `:` separators.
    pub link_address: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            link_address: "02:12:4b:00:06:0d:9f:31".to_string(),
        }
    }
}

impl BoardConfig {
    /// Parse the configured hardware address.
    pub fn link_address(&self) -> Result<LinkAddress, RunnerError> {
        parse_link_address(&self.link_address)
    }
}

/// Outcome the loopback stack reports for every packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopbackConfig {
    /// Link-layer status code.
    pub status: u8,
    /// Transmission attempts.
    pub transmissions: u8,
}

impl Default for LoopbackConfig {
    fn default() -> Self {
        LoopbackConfig {
            status: SendStatus::Ok.into(),
            transmissions: 1,
        }
    }
}

impl LoopbackConfig {
    pub fn status(&self) -> SendStatus {
        SendStatus::from(self.status)
    }
}

impl RunnerConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RunnerError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check every section before anything is started.
    pub fn validate(&self) -> Result<(), RunnerError> {
        self.node.validate()?;
        self.board.link_address()?;
        Ok(())
    }
}

/// Parse `02:12:4b:00:06:0d:9f:31` or `02124b00060d9f31`.
pub fn parse_link_address(text: &str) -> Result<LinkAddress, RunnerError> {
    let digits: String = text.chars().filter(|c| *c != ':').collect();
    hex::decode(&digits)
        .ok()
        .and_then(|bytes| LinkAddress::from_slice(&bytes))
        .ok_or_else(|| RunnerError::InvalidAddress(text.to_string()))
}
