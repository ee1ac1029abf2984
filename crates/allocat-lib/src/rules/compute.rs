//! Compute sizing: CPU cores and memory

use super::SizingRule;
use crate::error::RuleError;
use crate::models::{ComputeDecision, Decision, DecisionKind, InputSpec};
use std::time::Duration;

/// Requests per second served by one core
pub const CPU_LOAD_DIVISOR: f64 = 150.0;

/// Load above which extra headroom is allocated
pub const HIGH_LOAD_THRESHOLD: u32 = 300;

/// Data size (MB) above which memory scales with data
pub const DATA_MEMORY_THRESHOLD: u32 = 50;

/// Baseline memory in Mi that data-driven sizing builds on
pub const BASE_MEMORY_MI: u32 = 256;

const HIGH_LOAD_CPU_BONUS: f64 = 0.75;
const HIGH_IMPORTANCE_CPU_BONUS: f64 = 0.25;
const DEFAULT_MEMORY: &str = "256Mi";
const HIGH_LOAD_MEMORY: &str = "512Mi";
const HIGH_IMPORTANCE_MEMORY: &str = "1Gi";

/// Decide CPU and memory for an application.
///
/// The memory rules apply in order and later ones win: load baseline,
/// then importance, then data size.
pub fn decide_compute(spec: &InputSpec) -> ComputeDecision {
    let mut cpu = f64::from(spec.expected_load) / CPU_LOAD_DIVISOR;
    let mut memory = DEFAULT_MEMORY.to_string();

    if spec.expected_load > HIGH_LOAD_THRESHOLD {
        cpu += HIGH_LOAD_CPU_BONUS;
        memory = HIGH_LOAD_MEMORY.to_string();
    }
    if spec.importance.is_high() {
        cpu += HIGH_IMPORTANCE_CPU_BONUS;
        memory = HIGH_IMPORTANCE_MEMORY.to_string();
    }
    if spec.data_size > DATA_MEMORY_THRESHOLD {
        memory = format!("{}Mi", BASE_MEMORY_MI + spec.data_size / 4);
    }

    ComputeDecision { cpu, memory }
}

/// Rule wrapper around [`decide_compute`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeRule;

impl SizingRule for ComputeRule {
    fn kind(&self) -> DecisionKind {
        DecisionKind::Compute
    }

    fn decide(&self, spec: &InputSpec) -> Result<Decision, RuleError> {
        Ok(Decision::Compute(decide_compute(spec)))
    }

    fn simulated_latency(&self) -> Duration {
        Duration::from_millis(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Importance;

    fn spec(load: u32, data: u32, importance: Importance) -> InputSpec {
        InputSpec {
            app_name: "web".to_string(),
            expected_load: load,
            data_size: data,
            network_traffic: 0,
            importance,
        }
    }

    #[test]
    fn test_moderate_load_uses_defaults() {
        let decision = decide_compute(&spec(200, 0, Importance::Medium));
        assert!((decision.cpu - 200.0 / 150.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", decision.cpu), "1.33");
        assert_eq!(decision.memory, "256Mi");
    }

    #[test]
    fn test_high_load_adds_headroom() {
        let decision = decide_compute(&spec(450, 0, Importance::Low));
        assert!((decision.cpu - 3.75).abs() < 1e-9);
        assert_eq!(decision.memory, "512Mi");
    }

    #[test]
    fn test_load_at_threshold_is_not_high() {
        let decision = decide_compute(&spec(300, 0, Importance::Low));
        assert!((decision.cpu - 2.0).abs() < 1e-9);
        assert_eq!(decision.memory, "256Mi");
    }

    #[test]
    fn test_high_importance_forces_one_gi() {
        let decision = decide_compute(&spec(350, 10, Importance::High));
        assert!((decision.cpu - (350.0 / 150.0 + 1.0)).abs() < 1e-9);
        assert_eq!(decision.memory, "1Gi");
    }

    #[test]
    fn test_data_size_override_wins_over_importance() {
        let decision = decide_compute(&spec(350, 60, Importance::High));
        assert_eq!(format!("{:.2}", decision.cpu), "3.33");
        assert_eq!(decision.memory, "271Mi");
    }

    #[test]
    fn test_data_size_division_truncates() {
        let decision = decide_compute(&spec(0, 103, Importance::Low));
        assert_eq!(decision.memory, "281Mi");
    }

    #[test]
    fn test_zero_load_yields_zero_cpu() {
        let decision = decide_compute(&spec(0, 0, Importance::Low));
        assert_eq!(decision.cpu, 0.0);
    }
}
