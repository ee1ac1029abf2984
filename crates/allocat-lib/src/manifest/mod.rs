//! Deployment descriptor and summary generation
//!
//! Turns a [`DecisionSet`] into a Kubernetes Deployment written to disk
//! plus a summary for the terminal. A failed write is carried as a warning
//! next to the summary rather than replacing it.

mod descriptor;
mod summary;
mod writer;

pub use descriptor::{
    Container, ContainerPort, DeploymentDescriptor, DeploymentSpec, EnvVar, LabelSelector,
    ObjectMeta, PodSpec, PodTemplateSpec, ResourceQuantities, ResourceRequirements,
};
pub use summary::{format_duration, format_ports, DecisionRow, Summary};
pub use writer::{descriptor_path, write_descriptor};

use crate::aggregator::DecisionSet;
use crate::error::ManifestError;
use crate::models::InputSpec;
use crate::observability::StructuredLogger;
use std::path::PathBuf;

/// Share of the CPU limit requested up front
pub const CPU_REQUEST_RATIO: f64 = 0.8;

/// Directory descriptors are written to by default
pub const DEFAULT_OUTPUT_DIR: &str = "k8s";

/// Placeholder image used until the user supplies a real one
pub const DEFAULT_IMAGE: &str = "your-app-image:latest";

/// Configuration for manifest generation
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    pub output_dir: PathBuf,
    pub image: String,
    pub replicas: u32,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image: DEFAULT_IMAGE.to_string(),
            replicas: 1,
        }
    }
}

/// Result of generating and writing the manifest
#[derive(Debug)]
pub struct GenerationReport {
    pub descriptor: DeploymentDescriptor,
    /// Rendered YAML, absent when serialization failed
    pub yaml: Option<String>,
    pub summary: Summary,
    pub descriptor_path: Option<PathBuf>,
    pub warning: Option<ManifestError>,
}

/// Build the descriptor, write it under the configured directory and
/// prepare the summary
pub fn generate(
    spec: &InputSpec,
    decisions: &DecisionSet,
    config: &ManifestConfig,
) -> GenerationReport {
    let logger = StructuredLogger::new(&spec.app_name);
    let descriptor = DeploymentDescriptor::build(spec, decisions, config);
    let (yaml, written) = match descriptor.to_yaml() {
        Ok(yaml) => {
            let written = write_descriptor(&config.output_dir, &spec.app_name, &yaml);
            (Some(yaml), written)
        }
        Err(e) => (None, Err(ManifestError::Serialize(e))),
    };

    let (descriptor_path, warning) = match written {
        Ok(path) => {
            logger.log_manifest_written(&path, descriptor.port_count());
            (Some(path), None)
        }
        Err(e) => {
            logger.log_manifest_write_failed(&e);
            (None, Some(e))
        }
    };

    let summary = Summary::new(
        spec,
        decisions,
        descriptor_path.clone(),
        warning
            .as_ref()
            .map(|e| format!("failed to generate/write manifest: {}", e)),
    );

    GenerationReport {
        descriptor,
        yaml,
        summary,
        descriptor_path,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Aggregator, AggregatorConfig};
    use crate::models::Importance;
    use tempfile::TempDir;

    fn create_test_spec() -> InputSpec {
        InputSpec {
            app_name: "orders".to_string(),
            expected_load: 120,
            data_size: 40,
            network_traffic: 30,
            importance: Importance::High,
        }
    }

    async fn decide(spec: &InputSpec) -> DecisionSet {
        Aggregator::standard(AggregatorConfig {
            simulate_latency: false,
        })
        .run(spec)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_writes_descriptor() {
        let temp = TempDir::new().unwrap();
        let config = ManifestConfig {
            output_dir: temp.path().join("k8s"),
            ..Default::default()
        };
        let spec = create_test_spec();
        let decisions = decide(&spec).await;

        let report = generate(&spec, &decisions, &config);

        let path = report.descriptor_path.clone().unwrap();
        assert_eq!(path, temp.path().join("k8s").join("orders-deployment.yaml"));
        assert!(report.warning.is_none());

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Some(written.clone()), report.yaml);
        assert_eq!(
            written.matches("containerPort:").count(),
            decisions.network.value.ports.len()
        );
        assert!(report.summary.render_text().contains("orders-deployment.yaml"));
    }

    #[tokio::test]
    async fn test_write_failure_becomes_warning() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("k8s");
        std::fs::write(&blocker, "file in the way").unwrap();
        let config = ManifestConfig {
            output_dir: blocker,
            ..Default::default()
        };
        let spec = create_test_spec();
        let decisions = decide(&spec).await;

        let report = generate(&spec, &decisions, &config);

        assert!(report.descriptor_path.is_none());
        assert!(matches!(report.warning, Some(ManifestError::CreateDir { .. })));
        let summary = report.summary.render_text();
        assert!(summary.contains("Bandwidth=200Mbps"));
        assert!(!summary.contains("Deployment file generated"));
        assert!(report
            .summary
            .warning
            .as_deref()
            .unwrap()
            .starts_with("failed to generate/write manifest"));
    }

    #[test]
    fn test_custom_image_and_replicas() {
        let spec = create_test_spec();
        let decisions = tokio_test::block_on(decide(&spec));
        let config = ManifestConfig {
            image: "registry.local/orders:1.4".to_string(),
            replicas: 3,
            ..Default::default()
        };

        let yaml = DeploymentDescriptor::build(&spec, &decisions, &config)
            .to_yaml()
            .unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(
            doc["spec"]["template"]["spec"]["containers"][0]["image"].as_str(),
            Some("registry.local/orders:1.4")
        );
        assert_eq!(doc["spec"]["replicas"].as_u64(), Some(3));
    }
}
