//! Storage sizing: capacity and storage class

use super::SizingRule;
use crate::error::RuleError;
use crate::models::{Decision, DecisionKind, InputSpec, StorageClass, StorageDecision};
use std::time::Duration;

/// Data size (MB) above which premium storage is provisioned
pub const LARGE_DATA_THRESHOLD: u32 = 250;

const BASE_CAPACITY_GI: u32 = 5;
const HIGH_IMPORTANCE_CAPACITY: &str = "20Gi";

/// Decide capacity and class. High importance pins the capacity but
/// leaves the class chosen by the data-size rule in place.
pub fn decide_storage(spec: &InputSpec) -> StorageDecision {
    let mut capacity = format!("{}Gi", BASE_CAPACITY_GI);
    let mut class = StorageClass::Standard;

    if spec.data_size > LARGE_DATA_THRESHOLD {
        capacity = format!("{}Gi", BASE_CAPACITY_GI + spec.data_size / 100);
        class = StorageClass::Premium;
    }
    if spec.importance.is_high() {
        capacity = HIGH_IMPORTANCE_CAPACITY.to_string();
    }

    StorageDecision { capacity, class }
}

/// Rule wrapper around [`decide_storage`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageRule;

impl SizingRule for StorageRule {
    fn kind(&self) -> DecisionKind {
        DecisionKind::Storage
    }

    fn decide(&self, spec: &InputSpec) -> Result<Decision, RuleError> {
        Ok(Decision::Storage(decide_storage(spec)))
    }

    fn simulated_latency(&self) -> Duration {
        Duration::from_millis(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Importance;

    fn spec(data: u32, importance: Importance) -> InputSpec {
        InputSpec {
            app_name: "db".to_string(),
            expected_load: 50,
            data_size: data,
            network_traffic: 5,
            importance,
        }
    }

    #[test]
    fn test_small_data_is_standard() {
        let decision = decide_storage(&spec(100, Importance::Low));
        assert_eq!(decision.capacity, "5Gi");
        assert_eq!(decision.class, StorageClass::Standard);
    }

    #[test]
    fn test_large_data_goes_premium() {
        let decision = decide_storage(&spec(300, Importance::Medium));
        assert_eq!(decision.capacity, "8Gi");
        assert_eq!(decision.class, StorageClass::Premium);
    }

    #[test]
    fn test_high_importance_overrides_capacity_only() {
        let decision = decide_storage(&spec(300, Importance::High));
        assert_eq!(decision.capacity, "20Gi");
        assert_eq!(decision.class, StorageClass::Premium);
    }

    #[test]
    fn test_high_importance_small_data_stays_standard() {
        let decision = decide_storage(&spec(10, Importance::High));
        assert_eq!(decision.capacity, "20Gi");
        assert_eq!(decision.class, StorageClass::Standard);
    }

    #[test]
    fn test_data_at_threshold_is_not_large() {
        let decision = decide_storage(&spec(250, Importance::Low));
        assert_eq!(decision.capacity, "5Gi");
    }
}
