//! Threshold-based sizing rules
//!
//! Each rule is a pure function of an [`InputSpec`]. The [`SizingRule`]
//! trait wraps them so the aggregator can run any set of rules side by side.

mod compute;
mod network;
mod storage;

pub use compute::{
    decide_compute, ComputeRule, BASE_MEMORY_MI, CPU_LOAD_DIVISOR, DATA_MEMORY_THRESHOLD,
    HIGH_LOAD_THRESHOLD,
};
pub use network::{decide_network, NetworkRule, BASE_PORT, HIGH_TRAFFIC_THRESHOLD, TLS_PORT};
pub use storage::{decide_storage, StorageRule, LARGE_DATA_THRESHOLD};

use crate::error::RuleError;
use crate::models::{Decision, DecisionKind, InputSpec};
use std::sync::Arc;
use std::time::Duration;

/// Trait for sizing rule implementations
pub trait SizingRule: Send + Sync {
    /// Which decision this rule produces
    fn kind(&self) -> DecisionKind;

    /// Derive a decision from the input specification
    fn decide(&self, spec: &InputSpec) -> Result<Decision, RuleError>;

    /// Artificial delay applied before the rule runs when latency simulation is on
    fn simulated_latency(&self) -> Duration {
        Duration::ZERO
    }
}

/// The compute, network and storage rules
pub fn standard_rules() -> Vec<Arc<dyn SizingRule>> {
    vec![
        Arc::new(ComputeRule),
        Arc::new(NetworkRule),
        Arc::new(StorageRule),
    ]
}
