//! Kubernetes Deployment descriptor built from sizing decisions

use super::{ManifestConfig, CPU_REQUEST_RATIO};
use crate::aggregator::DecisionSet;
use crate::models::InputSpec;
use serde::Serialize;
use std::collections::BTreeMap;

pub const API_VERSION: &str = "apps/v1";
pub const KIND: &str = "Deployment";

/// A single-container `apps/v1` Deployment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDescriptor {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentSpec {
    pub replicas: u32,
    pub selector: LabelSelector,
    pub template: PodTemplateSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodTemplateSpec {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodSpec {
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub resources: ResourceRequirements,
    pub ports: Vec<ContainerPort>,
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRequirements {
    pub requests: ResourceQuantities,
    pub limits: ResourceQuantities,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceQuantities {
    pub cpu: String,
    pub memory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub container_port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

fn app_labels(app_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), app_name.to_string())])
}

impl DeploymentDescriptor {
    pub fn build(spec: &InputSpec, decisions: &DecisionSet, config: &ManifestConfig) -> Self {
        let compute = &decisions.compute.value;
        let network = &decisions.network.value;
        let storage = &decisions.storage.value;

        let ports = network
            .ports
            .iter()
            .map(|&port| ContainerPort {
                container_port: port,
                protocol: "TCP".to_string(),
            })
            .collect();

        let env = vec![
            EnvVar {
                name: "NETWORK_BANDWIDTH".to_string(),
                value: network.bandwidth.clone(),
            },
            EnvVar {
                name: "STORAGE_CAPACITY".to_string(),
                value: storage.capacity.clone(),
            },
            EnvVar {
                name: "STORAGE_CLASS".to_string(),
                value: storage.class.to_string(),
            },
        ];

        let container = Container {
            name: format!("{}-container", spec.app_name),
            image: config.image.clone(),
            resources: ResourceRequirements {
                // Memory requests equal limits; CPU requests leave burst room
                requests: ResourceQuantities {
                    cpu: format!("{:.2}", compute.cpu * CPU_REQUEST_RATIO),
                    memory: compute.memory.clone(),
                },
                limits: ResourceQuantities {
                    cpu: format!("{:.2}", compute.cpu),
                    memory: compute.memory.clone(),
                },
            },
            ports,
            env,
        };

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: Some(format!("{}-deployment", spec.app_name)),
                ..Default::default()
            },
            spec: DeploymentSpec {
                replicas: config.replicas,
                selector: LabelSelector {
                    match_labels: app_labels(&spec.app_name),
                },
                template: PodTemplateSpec {
                    metadata: ObjectMeta {
                        labels: app_labels(&spec.app_name),
                        ..Default::default()
                    },
                    spec: PodSpec {
                        containers: vec![container],
                    },
                },
            },
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.spec.template.spec.containers
    }

    /// Number of container ports across all containers
    pub fn port_count(&self) -> usize {
        self.containers().iter().map(|c| c.ports.len()).sum()
    }

    /// Render as a YAML document
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
