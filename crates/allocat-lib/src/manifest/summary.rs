//! Human-readable summary of an allocation run

use crate::aggregator::DecisionSet;
use crate::models::{
    ComputeDecision, DecisionKind, InputSpec, NetworkDecision, StorageDecision,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

/// Row for the decisions table
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DecisionRow {
    #[tabled(rename = "Decision")]
    pub decision: String,
    #[tabled(rename = "Resources")]
    pub resources: String,
    #[tabled(rename = "Took")]
    #[serde(skip)]
    pub took: String,
    #[tabled(skip)]
    pub duration_ms: f64,
}

/// Everything shown to the user after a successful run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub app_name: String,
    pub generated_at: DateTime<Utc>,
    pub compute: ComputeDecision,
    pub network: NetworkDecision,
    pub storage: StorageDecision,
    pub decisions: Vec<DecisionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Summary {
    pub fn new(
        spec: &InputSpec,
        decisions: &DecisionSet,
        descriptor_path: Option<PathBuf>,
        warning: Option<String>,
    ) -> Self {
        let compute = &decisions.compute.value;
        let network = &decisions.network.value;
        let storage = &decisions.storage.value;

        let rows = vec![
            row(
                DecisionKind::Compute,
                format!("CPU={:.2} cores, Memory={}", compute.cpu, compute.memory),
                decisions.compute.duration,
            ),
            row(
                DecisionKind::Network,
                format!(
                    "Bandwidth={}, Ports={}",
                    network.bandwidth,
                    format_ports(&network.ports)
                ),
                decisions.network.duration,
            ),
            row(
                DecisionKind::Storage,
                format!("Capacity={}, Class={}", storage.capacity, storage.class),
                decisions.storage.duration,
            ),
        ];

        Self {
            app_name: spec.app_name.clone(),
            generated_at: Utc::now(),
            compute: compute.clone(),
            network: network.clone(),
            storage: storage.clone(),
            decisions: rows,
            descriptor_path,
            warning,
        }
    }

    /// Plain-text rendering: heading, decisions table and output location
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Resource Allocation Decision: {}\n", self.app_name));
        out.push_str(&format!("{}\n\n", "=".repeat(60)));

        let table = Table::new(&self.decisions).with(Style::rounded()).to_string();
        out.push_str(&table);
        out.push('\n');

        if let Some(path) = &self.descriptor_path {
            out.push_str(&format!(
                "\nDeployment file generated within {}\n",
                path.display()
            ));
        }

        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn row(kind: DecisionKind, resources: String, duration: Duration) -> DecisionRow {
    DecisionRow {
        decision: capitalize(kind.name()),
        resources,
        took: format_duration(duration),
        duration_ms: duration.as_secs_f64() * 1000.0,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Format ports as "[8080, 443]"
pub fn format_ports(ports: &[u16]) -> String {
    let joined: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
    format!("[{}]", joined.join(", "))
}

/// Format a duration as milliseconds or seconds
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_secs_f64() * 1000.0;
    if millis >= 1000.0 {
        format!("{:.2}s", millis / 1000.0)
    } else if millis >= 1.0 {
        format!("{:.1}ms", millis)
    } else {
        format!("{}µs", duration.as_micros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Timed;
    use crate::models::{Importance, StorageClass};

    fn create_test_summary(path: Option<PathBuf>) -> Summary {
        let spec = InputSpec {
            app_name: "billing".to_string(),
            expected_load: 200,
            data_size: 0,
            network_traffic: 30,
            importance: Importance::High,
        };
        let set = DecisionSet {
            compute: Timed {
                value: ComputeDecision {
                    cpu: 200.0 / 150.0,
                    memory: "256Mi".to_string(),
                },
                duration: Duration::from_millis(201),
            },
            network: Timed {
                value: NetworkDecision {
                    bandwidth: "200Mbps".to_string(),
                    ports: vec![8080, 443],
                },
                duration: Duration::from_millis(150),
            },
            storage: Timed {
                value: StorageDecision {
                    capacity: "20Gi".to_string(),
                    class: StorageClass::Standard,
                },
                duration: Duration::from_micros(250),
            },
        };
        Summary::new(&spec, &set, path, None)
    }

    #[test]
    fn test_text_lists_each_decision() {
        let text = create_test_summary(None).render_text();

        assert!(text.contains("billing"));
        assert!(text.contains("CPU=1.33 cores, Memory=256Mi"));
        assert!(text.contains("Bandwidth=200Mbps, Ports=[8080, 443]"));
        assert!(text.contains("Capacity=20Gi, Class=standard"));
        assert!(text.contains("201.0ms"));
        assert!(text.contains("250µs"));
        assert!(!text.contains("Deployment file generated"));
    }

    #[test]
    fn test_text_includes_descriptor_path() {
        let summary = create_test_summary(Some(PathBuf::from("k8s/billing-deployment.yaml")));
        assert!(summary
            .render_text()
            .contains("Deployment file generated within k8s/billing-deployment.yaml"));
    }

    #[test]
    fn test_json_output() {
        let summary = create_test_summary(Some(PathBuf::from("k8s/billing-deployment.yaml")));
        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();

        assert_eq!(value["app_name"], "billing");
        assert_eq!(value["network"]["ports"], serde_json::json!([8080, 443]));
        assert_eq!(value["storage"]["class"], "standard");
        assert_eq!(value["decisions"][0]["decision"], "Compute");
        assert_eq!(value["descriptor_path"], "k8s/billing-deployment.yaml");
        assert!(value.get("warning").is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_millis(12)), "12.0ms");
        assert_eq!(format_duration(Duration::from_micros(40)), "40µs");
    }
}
