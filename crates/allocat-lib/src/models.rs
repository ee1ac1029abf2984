//! Core data models for resource sizing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseImportanceError;

/// Qualitative importance of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    /// All levels in the order they are offered to the user
    pub const ALL: [Importance; 3] = [Importance::High, Importance::Medium, Importance::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::High => "high",
            Importance::Medium => "medium",
            Importance::Low => "low",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Importance::High)
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = ParseImportanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Importance::High),
            "medium" => Ok(Importance::Medium),
            "low" => Ok(Importance::Low),
            _ => Err(ParseImportanceError(s.to_string())),
        }
    }
}

/// Application specification collected from the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub app_name: String,
    /// Expected requests per second
    pub expected_load: u32,
    /// Size of data to be processed in MB
    pub data_size: u32,
    /// Expected network bandwidth in Mbps
    pub network_traffic: u32,
    pub importance: Importance,
}

/// Decided compute resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeDecision {
    /// CPU allocation in cores
    pub cpu: f64,
    /// Memory allocation, e.g. "512Mi"
    pub memory: String,
}

/// Decided network resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDecision {
    /// Bandwidth, e.g. "200Mbps"
    pub bandwidth: String,
    pub ports: Vec<u16>,
}

/// Storage class for persistent volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageClass {
    Standard,
    Premium,
}

impl StorageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Standard => "standard",
            StorageClass::Premium => "premium",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decided storage resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDecision {
    /// Capacity, e.g. "20Gi"
    pub capacity: String,
    pub class: StorageClass,
}

/// Which sizing decision a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Compute,
    Network,
    Storage,
}

impl DecisionKind {
    pub const ALL: [DecisionKind; 3] =
        [DecisionKind::Compute, DecisionKind::Network, DecisionKind::Storage];

    /// Lookup key used when reporting results
    pub fn name(&self) -> &'static str {
        match self {
            DecisionKind::Compute => "compute",
            DecisionKind::Network => "network",
            DecisionKind::Storage => "storage",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a single sizing rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decision {
    Compute(ComputeDecision),
    Network(NetworkDecision),
    Storage(StorageDecision),
}

impl Decision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::Compute(_) => DecisionKind::Compute,
            Decision::Network(_) => DecisionKind::Network,
            Decision::Storage(_) => DecisionKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_parsing() {
        assert_eq!("high".parse::<Importance>().unwrap(), Importance::High);
        assert_eq!(" Medium ".parse::<Importance>().unwrap(), Importance::Medium);
        assert_eq!("LOW".parse::<Importance>().unwrap(), Importance::Low);
        assert!("urgent".parse::<Importance>().is_err());
    }

    #[test]
    fn test_importance_serializes_lowercase() {
        let json = serde_json::to_string(&Importance::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_decision_kind_names() {
        let names: Vec<_> = DecisionKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["compute", "network", "storage"]);
    }

    #[test]
    fn test_decision_reports_kind() {
        let decision = Decision::Storage(StorageDecision {
            capacity: "5Gi".to_string(),
            class: StorageClass::Standard,
        });
        assert_eq!(decision.kind(), DecisionKind::Storage);
    }
}
