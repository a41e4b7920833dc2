//! Metrics infrastructure for the SLIP-radio node.
//!
//! Every metric the node emits is declared once here as a [`Metric`] constant,
//! so names, units and label keys live in a single place. The crate re-exports
//! `metrics` so callers record through the same facade version.
//!
//! # Example
//!
//! ```rust,ignore
//! use slipradio_metrics::{metric_defs, describe_metrics, NodeLabels};
//!
//! describe_metrics();
//!
//! let labels = NodeLabels::new("radio0");
//! metrics::counter!(metric_defs::TX_SUBMITTED.name, &labels.to_labels()).increment(1);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_histogram, Unit};

/// How a metric is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
}

/// Name, kind, unit and label keys of one metric.
///
/// ```rust
/// use slipradio_metrics::{Metric, MetricKind};
/// use metrics::Unit;
///
/// const FRAMES: Metric = Metric::counter("slipradio.example.frames")
///     .with_description("Frames seen")
///     .with_unit(Unit::Count)
///     .with_labels(&["node"]);
///
/// assert_eq!(FRAMES.kind, MetricKind::Counter);
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// Dotted name, `slipradio.<area>.<what>`.
    pub name: &'static str,
    pub kind: MetricKind,
    pub description: &'static str,
    pub unit: Option<Unit>,
    /// Label keys every recording carries.
    pub labels: &'static [&'static str],
}

impl Metric {
    const fn new(name: &'static str, kind: MetricKind) -> Self {
        Metric {
            name,
            kind,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    pub const fn counter(name: &'static str) -> Self {
        Self::new(name, MetricKind::Counter)
    }

    pub const fn histogram(name: &'static str) -> Self {
        Self::new(name, MetricKind::Histogram)
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Hand the description and unit to the installed recorder.
    pub fn describe(&self) {
        let unit = self.unit.unwrap_or(Unit::Count);
        match self.kind {
            MetricKind::Counter => describe_counter!(self.name, unit, self.description),
            MetricKind::Histogram => describe_histogram!(self.name, unit, self.description),
        }
    }
}

/// All metric definitions for the node.
pub mod metric_defs {
    use super::{Metric, Unit};

    /// Labels present on every node metric.
    pub const STANDARD_LABELS: &[&str] = &["node"];

    // ========================================================================
    // Command Dispatch
    // ========================================================================

    /// Frames routed to a built-in command handler.
    ///
    /// Labels: node, command
    pub const CMD_FRAMES: Metric = Metric::counter("slipradio.cmd.frames")
        .with_description("Frames routed to a command handler")
        .with_unit(Unit::Count)
        .with_labels(&["node", "command"]);

    /// Frames no handler accepted.
    pub const CMD_UNHANDLED: Metric = Metric::counter("slipradio.cmd.unhandled")
        .with_description("Frames no handler accepted")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    // ========================================================================
    // Outgoing Packets
    // ========================================================================

    /// Packets handed to the network stack.
    pub const TX_SUBMITTED: Metric = Metric::counter("slipradio.tx.submitted")
        .with_description("Packets handed to the network stack")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Send commands dropped because the attribute region was malformed.
    pub const TX_MALFORMED_ATTRIBUTES: Metric = Metric::counter("slipradio.tx.malformed_attributes")
        .with_description("Send commands dropped for malformed attributes")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Payloads cut down to the staging buffer capacity.
    pub const TX_PAYLOAD_TRUNCATED: Metric = Metric::counter("slipradio.tx.payload_truncated")
        .with_description("Payloads truncated to the staging buffer capacity")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Send commands accepted while no network stack was attached.
    pub const TX_STACK_UNAVAILABLE: Metric = Metric::counter("slipradio.tx.stack_unavailable")
        .with_description("Send commands accepted with no network stack attached")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Staged payload size.
    pub const TX_PAYLOAD_SIZE: Metric = Metric::histogram("slipradio.tx.payload_size_bytes")
        .with_description("Staged payload size in bytes")
        .with_unit(Unit::Bytes)
        .with_labels(STANDARD_LABELS);

    // ========================================================================
    // Send Completions
    // ========================================================================

    /// Completions reported by the network stack.
    ///
    /// Labels: node, status
    pub const TX_COMPLETED: Metric = Metric::counter("slipradio.tx.completed")
        .with_description("Send completions reported by the network stack")
        .with_unit(Unit::Count)
        .with_labels(&["node", "status"]);

    /// Transmission attempts per completed send.
    pub const TX_TRANSMISSIONS: Metric = Metric::histogram("slipradio.tx.transmissions")
        .with_description("Transmission attempts per completed send")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    // ========================================================================
    // Node Control
    // ========================================================================

    /// Reset requests issued to the board.
    pub const NODE_REBOOTS: Metric = Metric::counter("slipradio.node.reboots")
        .with_description("Reset requests issued to the board")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Hardware address queries answered.
    pub const NODE_ADDRESS_QUERIES: Metric = Metric::counter("slipradio.node.address_queries")
        .with_description("Hardware address queries answered")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Reply frames the transport refused.
    pub const NODE_REPLY_FAILURES: Metric = Metric::counter("slipradio.node.reply_failures")
        .with_description("Reply frames the transport refused")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Every metric definition.
    pub const ALL: &[Metric] = &[
        CMD_FRAMES,
        CMD_UNHANDLED,
        TX_SUBMITTED,
        TX_MALFORMED_ATTRIBUTES,
        TX_PAYLOAD_TRUNCATED,
        TX_STACK_UNAVAILABLE,
        TX_PAYLOAD_SIZE,
        TX_COMPLETED,
        TX_TRANSMISSIONS,
        NODE_REBOOTS,
        NODE_ADDRESS_QUERIES,
        NODE_REPLY_FAILURES,
    ];
}

/// Labels identifying one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLabels {
    /// Node name.
    pub node: String,
}

impl NodeLabels {
    pub fn new(node: impl Into<String>) -> Self {
        NodeLabels { node: node.into() }
    }

    /// Label pairs in the form the `metrics` macros take.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![("node", self.node.clone())]
    }

    /// The node label followed by `extra`.
    ///
    /// ```rust
    /// use slipradio_metrics::NodeLabels;
    ///
    /// let labels = NodeLabels::new("radio0").with(&[("status", "ok".to_string())]);
    /// assert!(labels.iter().any(|(k, v)| *k == "status" && v == "ok"));
    /// ```
    pub fn with(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let mut pairs = self.to_labels();
        pairs.extend_from_slice(extra);
        pairs
    }
}

/// Describe every node metric. Has no effect until a recorder is installed.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}
