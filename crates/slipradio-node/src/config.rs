//! Node configuration.

use serde::{Deserialize, Serialize};
use slipradio_protocol::{DEFAULT_PAYLOAD_CAPACITY, MAX_FRAMED_SIZE};

use crate::error::NodeError;

/// What happens to a claimed packet identifier slot when the packet never
/// reaches the network stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Advance on every accepted send command, submitted or not.
    #[default]
    AlwaysAdvance,
    /// Rewind the ring so the slot is reused by the next send. Every consumed
    /// slot then has a completion on the way.
    ReleaseUnsubmitted,
}

/// Configuration for a [`SlipRadio`](crate::SlipRadio) node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Name used in log fields and metric labels.
    pub name: String,
    /// Capacity of the outgoing payload buffer in bytes, at most
    /// [`MAX_FRAMED_SIZE`].
    pub payload_capacity: usize,
    /// Slot handling for packets that are not submitted.
    pub slot_policy: SlotPolicy,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            name: "slipradio".to_string(),
            payload_capacity: DEFAULT_PAYLOAD_CAPACITY,
            slot_policy: SlotPolicy::default(),
        }
    }
}

impl NodeConfig {
    /// Check the configuration for values the node cannot run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.payload_capacity == 0 {
            return Err(NodeError::InvalidConfig(
                "payload_capacity must be at least 1 byte".to_string(),
            ));
        }
        if self.payload_capacity > MAX_FRAMED_SIZE {
            return Err(NodeError::InvalidConfig(format!(
                "payload_capacity {} exceeds the {} byte frame limit",
                self.payload_capacity, MAX_FRAMED_SIZE
            )));
        }
        if self.name.is_empty() {
            return Err(NodeError::InvalidConfig("name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.payload_capacity, 128);
        assert_eq!(config.slot_policy, SlotPolicy::AlwaysAdvance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config: NodeConfig =
            serde_yaml::from_str("slot_policy: release_unsubmitted\n").unwrap();
        assert_eq!(config.slot_policy, SlotPolicy::ReleaseUnsubmitted);
        assert_eq!(config.payload_capacity, 128);
        assert_eq!(config.name, "slipradio");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = NodeConfig {
            payload_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NodeError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let config: NodeConfig =
            serde_yaml::from_str("payload_capacity: 18446744073709551615\n").unwrap();
        assert!(matches!(config.validate(), Err(NodeError::InvalidConfig(_))));

        let at_limit = NodeConfig {
            payload_capacity: MAX_FRAMED_SIZE,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = NodeConfig {
            payload_capacity: MAX_FRAMED_SIZE + 1,
            ..Default::default()
        };
        assert!(over.validate().is_err());
    }
}
