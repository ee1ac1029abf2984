//! Concurrent evaluation of sizing rules
//!
//! Runs one task per rule, collects every result over a channel and joins
//! them into a [`DecisionSet`]. A single failing rule fails the whole run;
//! the remaining tasks still complete but their results are discarded.

use crate::error::{AllocationError, DecisionFailure, RuleError};
use crate::models::{
    ComputeDecision, Decision, DecisionKind, InputSpec, NetworkDecision, StorageDecision,
};
use crate::observability::StructuredLogger;
use crate::rules::{standard_rules, SizingRule};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Configuration for the aggregator
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Sleep for each rule's simulated latency before evaluating it
    pub simulate_latency: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
        }
    }
}

/// Outcome of one rule evaluation
#[derive(Debug)]
pub struct DecisionResult {
    pub kind: DecisionKind,
    pub outcome: Result<Decision, RuleError>,
    /// Wall-clock time including any simulated latency
    pub duration: Duration,
}

/// A value paired with the time it took to compute
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub duration: Duration,
}

/// The three successful decisions of a run
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSet {
    pub compute: Timed<ComputeDecision>,
    pub network: Timed<NetworkDecision>,
    pub storage: Timed<StorageDecision>,
}

impl DecisionSet {
    /// Join rule results, failing if any rule failed or a decision is absent
    pub fn from_results(results: Vec<DecisionResult>) -> Result<Self, AllocationError> {
        let mut failures = Vec::new();
        let mut decisions = Vec::with_capacity(results.len());

        for result in results {
            match result.outcome {
                Ok(decision) => decisions.push((decision, result.duration)),
                Err(error) => failures.push(DecisionFailure {
                    kind: result.kind,
                    error,
                }),
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| f.kind);
            return Err(AllocationError::DecisionFailed(failures));
        }

        let mut compute = None;
        let mut network = None;
        let mut storage = None;

        for (decision, duration) in decisions {
            let kind = decision.kind();
            let filled = match decision {
                Decision::Compute(value) => compute.replace(Timed { value, duration }).is_some(),
                Decision::Network(value) => network.replace(Timed { value, duration }).is_some(),
                Decision::Storage(value) => storage.replace(Timed { value, duration }).is_some(),
            };
            if filled {
                return Err(AllocationError::DuplicateDecision(kind));
            }
        }

        Ok(Self {
            compute: compute.ok_or(AllocationError::MissingDecision(DecisionKind::Compute))?,
            network: network.ok_or(AllocationError::MissingDecision(DecisionKind::Network))?,
            storage: storage.ok_or(AllocationError::MissingDecision(DecisionKind::Storage))?,
        })
    }

    /// Look up a decision by its name ("compute", "network" or "storage")
    pub fn get(&self, name: &str) -> Option<Decision> {
        match name {
            "compute" => Some(Decision::Compute(self.compute.value.clone())),
            "network" => Some(Decision::Network(self.network.value.clone())),
            "storage" => Some(Decision::Storage(self.storage.value.clone())),
            _ => None,
        }
    }

    pub fn duration(&self, kind: DecisionKind) -> Duration {
        match kind {
            DecisionKind::Compute => self.compute.duration,
            DecisionKind::Network => self.network.duration,
            DecisionKind::Storage => self.storage.duration,
        }
    }
}

/// Fans an input specification out to every rule and joins the results
pub struct Aggregator {
    rules: Vec<Arc<dyn SizingRule>>,
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(rules: Vec<Arc<dyn SizingRule>>, config: AggregatorConfig) -> Self {
        Self { rules, config }
    }

    /// Aggregator over the compute, network and storage rules
    pub fn standard(config: AggregatorConfig) -> Self {
        Self::new(standard_rules(), config)
    }

    /// Evaluate all rules concurrently and wait for every one to finish
    pub async fn run(&self, spec: &InputSpec) -> Result<DecisionSet, AllocationError> {
        let logger = StructuredLogger::new(&spec.app_name);
        let start = Instant::now();
        let shared = Arc::new(spec.clone());
        let (tx, mut rx) = mpsc::channel(self.rules.len().max(1));

        let mut handles = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let rule = Arc::clone(rule);
            let spec = Arc::clone(&shared);
            let tx = tx.clone();
            let simulate = self.config.simulate_latency;
            let kind = rule.kind();

            let handle = tokio::spawn(async move {
                debug!(decision = %kind, app = %spec.app_name, "Starting decision");
                let started = Instant::now();
                if simulate {
                    tokio::time::sleep(rule.simulated_latency()).await;
                }
                let outcome = rule.decide(&spec);
                let result = DecisionResult {
                    kind,
                    outcome,
                    duration: started.elapsed(),
                };
                let _ = tx.send(result).await;
            });
            handles.push((kind, handle));
        }
        drop(tx);

        let mut results = Vec::with_capacity(self.rules.len());
        while let Some(result) = rx.recv().await {
            logger.log_decision(result.kind, result.duration, result.outcome.is_ok());
            results.push(result);
        }

        for (kind, handle) in handles {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    let err = AllocationError::TaskPanicked(kind);
                    logger.log_allocation_failed(&err);
                    return Err(err);
                }
            }
        }

        match DecisionSet::from_results(results) {
            Ok(set) => {
                info!(
                    app = %spec.app_name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Resource allocation decided"
                );
                Ok(set)
            }
            Err(err) => {
                logger.log_allocation_failed(&err);
                Err(err)
            }
        }
    }
}
