//! Structured logging for allocation sessions
//!
//! Emits named events with consistent fields so a run can be followed
//! in JSON logs.

use crate::error::{AllocationError, ManifestError};
use crate::models::{DecisionKind, InputSpec};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Structured logger for one application's sizing session
#[derive(Clone)]
pub struct StructuredLogger {
    app_name: String,
}

impl StructuredLogger {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Log the collected input before allocation starts
    pub fn log_session_start(&self, version: &str, spec: &InputSpec) {
        info!(
            event = "session_started",
            app = %self.app_name,
            tool_version = %version,
            expected_load = spec.expected_load,
            data_size_mb = spec.data_size,
            network_traffic_mbps = spec.network_traffic,
            importance = %spec.importance,
            "Starting resource allocation"
        );
    }

    /// Log the completion of a single decision task
    pub fn log_decision(&self, kind: DecisionKind, duration: Duration, success: bool) {
        if success {
            debug!(
                event = "decision_completed",
                app = %self.app_name,
                decision = %kind,
                duration_ms = duration.as_millis() as u64,
                "Decision completed"
            );
        } else {
            warn!(
                event = "decision_completed",
                app = %self.app_name,
                decision = %kind,
                duration_ms = duration.as_millis() as u64,
                success = false,
                "Decision failed"
            );
        }
    }

    pub fn log_allocation_failed(&self, error: &AllocationError) {
        let failed: Vec<&str> = error.failed_decisions().iter().map(|k| k.name()).collect();
        warn!(
            event = "allocation_failed",
            app = %self.app_name,
            failed_decisions = ?failed,
            error = %error,
            "Resource allocation failed"
        );
    }

    pub fn log_manifest_written(&self, path: &Path, port_count: usize) {
        info!(
            event = "manifest_written",
            app = %self.app_name,
            path = %path.display(),
            port_count = port_count,
            "Deployment descriptor written"
        );
    }

    pub fn log_manifest_write_failed(&self, error: &ManifestError) {
        warn!(
            event = "manifest_write_failed",
            app = %self.app_name,
            error = %error,
            "Could not write deployment descriptor"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-app");
        assert_eq!(logger.app_name, "test-app");
    }
}
