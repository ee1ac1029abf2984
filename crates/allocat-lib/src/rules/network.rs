//! Network sizing: bandwidth and exposed ports

use super::SizingRule;
use crate::error::RuleError;
use crate::models::{Decision, DecisionKind, InputSpec, NetworkDecision};
use std::time::Duration;

/// Port every application listens on
pub const BASE_PORT: u16 = 8080;

/// Extra port exposed for high-importance applications
pub const TLS_PORT: u16 = 443;

/// Traffic (Mbps) above which the larger bandwidth tier is used
pub const HIGH_TRAFFIC_THRESHOLD: u32 = 25;

const DEFAULT_BANDWIDTH: &str = "50Mbps";
const HIGH_BANDWIDTH: &str = "200Mbps";

pub fn decide_network(spec: &InputSpec) -> NetworkDecision {
    let bandwidth = if spec.network_traffic > HIGH_TRAFFIC_THRESHOLD {
        HIGH_BANDWIDTH
    } else {
        DEFAULT_BANDWIDTH
    };

    let mut ports = vec![BASE_PORT];
    if spec.importance.is_high() {
        ports.push(TLS_PORT);
    }

    NetworkDecision {
        bandwidth: bandwidth.to_string(),
        ports,
    }
}

/// Rule wrapper around [`decide_network`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkRule;

impl SizingRule for NetworkRule {
    fn kind(&self) -> DecisionKind {
        DecisionKind::Network
    }

    fn decide(&self, spec: &InputSpec) -> Result<Decision, RuleError> {
        Ok(Decision::Network(decide_network(spec)))
    }

    fn simulated_latency(&self) -> Duration {
        Duration::from_millis(150)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Importance;

    fn spec(traffic: u32, importance: Importance) -> InputSpec {
        InputSpec {
            app_name: "api".to_string(),
            expected_load: 100,
            data_size: 10,
            network_traffic: traffic,
            importance,
        }
    }

    #[test]
    fn test_high_traffic_high_importance() {
        let decision = decide_network(&spec(30, Importance::High));
        assert_eq!(decision.bandwidth, "200Mbps");
        assert_eq!(decision.ports, vec![8080, 443]);
    }

    #[test]
    fn test_low_traffic_defaults() {
        let decision = decide_network(&spec(10, Importance::Medium));
        assert_eq!(decision.bandwidth, "50Mbps");
        assert_eq!(decision.ports, vec![8080]);
    }

    #[test]
    fn test_traffic_at_threshold_stays_default() {
        let decision = decide_network(&spec(25, Importance::Low));
        assert_eq!(decision.bandwidth, "50Mbps");
    }
}
