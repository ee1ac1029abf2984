//! Error types for sizing, aggregation and manifest generation

use std::path::PathBuf;
use thiserror::Error;

use crate::models::DecisionKind;

/// Returned when an importance level string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown importance level '{0}' (expected high, medium or low)")]
pub struct ParseImportanceError(pub String);

/// Failure reported by a single sizing rule
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A named decision that failed during aggregation
#[derive(Debug)]
pub struct DecisionFailure {
    pub kind: DecisionKind,
    pub error: RuleError,
}

/// Errors that abort an allocation run
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("{}", join_failures(.0))]
    DecisionFailed(Vec<DecisionFailure>),

    #[error("{0} decision task panicked")]
    TaskPanicked(DecisionKind),

    #[error("no result received for {0} decision")]
    MissingDecision(DecisionKind),

    #[error("{0} decision was produced more than once")]
    DuplicateDecision(DecisionKind),
}

impl AllocationError {
    /// Names of the decisions responsible for this error
    pub fn failed_decisions(&self) -> Vec<DecisionKind> {
        match self {
            AllocationError::DecisionFailed(failures) => {
                failures.iter().map(|f| f.kind).collect()
            }
            AllocationError::TaskPanicked(kind)
            | AllocationError::MissingDecision(kind)
            | AllocationError::DuplicateDecision(kind) => vec![*kind],
        }
    }
}

fn join_failures(failures: &[DecisionFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("error in {} decision: {}", f.kind, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors writing the deployment descriptor
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("error creating {} directory: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing Kubernetes manifest {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error serializing Kubernetes manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_failure_message_names_each_decision() {
        let err = AllocationError::DecisionFailed(vec![
            DecisionFailure {
                kind: DecisionKind::Compute,
                error: RuleError::Rejected("boom".to_string()),
            },
            DecisionFailure {
                kind: DecisionKind::Storage,
                error: RuleError::Rejected("disk".to_string()),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "error in compute decision: boom; error in storage decision: disk"
        );
        assert_eq!(
            err.failed_decisions(),
            vec![DecisionKind::Compute, DecisionKind::Storage]
        );
    }

    #[test]
    fn test_manifest_error_mentions_path() {
        let err = ManifestError::Write {
            path: PathBuf::from("k8s/app-deployment.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("k8s/app-deployment.yaml"));
    }
}
