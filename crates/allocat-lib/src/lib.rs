//! Sizing library for application deployments
//!
//! This crate provides the core functionality for:
//! - Threshold-based compute, network and storage sizing rules
//! - Concurrent evaluation and joining of rule results
//! - Kubernetes Deployment descriptor and summary generation
//! - Structured logging of allocation sessions

pub mod aggregator;
pub mod error;
pub mod manifest;
pub mod models;
pub mod observability;
pub mod rules;

pub use aggregator::{Aggregator, AggregatorConfig, DecisionResult, DecisionSet, Timed};
pub use error::{AllocationError, DecisionFailure, ManifestError, ParseImportanceError, RuleError};
pub use manifest::{generate, GenerationReport, ManifestConfig, Summary};
pub use models::*;
pub use observability::StructuredLogger;
