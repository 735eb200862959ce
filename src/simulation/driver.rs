/*!
 * Request Driver
 * Feeds a request stream through the partition allocator
 */

use super::request::{Operation, Request, Workload};
use crate::core::types::{Address, Size};
use crate::memory::{FitStrategy, MemoryError, MemoryResult, MemoryStats, PartitionManager};
use crate::monitoring::RunSpan;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why a request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NoFit,
    NotFound,
    InvalidSize,
}

impl RejectReason {
    /// Request-level rejection for an allocator error, `None` for errors that
    /// indicate a broken allocator rather than a refused request
    pub fn from_error(err: &MemoryError) -> Option<Self> {
        match err {
            MemoryError::NoFit { .. } => Some(RejectReason::NoFit),
            MemoryError::NotFound(_) => Some(RejectReason::NotFound),
            MemoryError::InvalidSize { .. } => Some(RejectReason::InvalidSize),
            MemoryError::InvalidCapacity(_) | MemoryError::CorruptionDetected { .. } => None,
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RejectReason::NoFit => write!(f, "no free partition large enough"),
            RejectReason::NotFound => write!(f, "no allocated partition for process"),
            RejectReason::InvalidSize => write!(f, "invalid size"),
        }
    }
}

/// Result of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    /// Zero-based position in the request stream
    pub index: usize,
    pub request: Request,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    /// Start of the allocated partition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Units freed by a release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<Size>,
}

/// Rejections per reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub no_fit: usize,
    pub not_found: usize,
    pub invalid_size: usize,
}

impl RejectionCounts {
    pub fn total(&self) -> usize {
        self.no_fit + self.not_found + self.invalid_size
    }
}

/// Aggregate result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub run_id: String,
    pub strategy: FitStrategy,
    pub total_requests: usize,
    pub processed: usize,
    pub accepted: usize,
    pub rejected: RejectionCounts,
    pub stats: MemoryStats,
}

/// Runs a workload against one placement strategy
pub struct Simulation {
    manager: PartitionManager,
    strategy: FitStrategy,
    requests: Vec<Request>,
    outcomes: Vec<RequestOutcome>,
    span: RunSpan,
}

impl Simulation {
    pub fn new(workload: Workload, strategy: FitStrategy) -> MemoryResult<Self> {
        let manager = PartitionManager::new(workload.total_size)?;
        let span = RunSpan::new(
            strategy.name(),
            workload.total_size,
            workload.requests.len(),
        );

        Ok(Self {
            manager,
            strategy,
            requests: workload.requests,
            outcomes: Vec::new(),
            span,
        })
    }

    pub fn manager(&self) -> &PartitionManager {
        &self.manager
    }

    pub fn strategy(&self) -> FitStrategy {
        self.strategy
    }

    pub fn run_id(&self) -> &str {
        self.span.run_id()
    }

    pub fn outcomes(&self) -> &[RequestOutcome] {
        &self.outcomes
    }

    pub fn is_finished(&self) -> bool {
        self.outcomes.len() >= self.requests.len()
    }

    /// Execute the next request. Returns `None` once the stream is exhausted.
    ///
    /// Refused requests produce an outcome with `accepted == false`; only
    /// allocator corruption surfaces as `Err`.
    pub fn step(&mut self) -> Option<MemoryResult<&RequestOutcome>> {
        let index = self.outcomes.len();
        let request = *self.requests.get(index)?;

        let _entered = self.span.enter();
        let outcome = match execute(&mut self.manager, self.strategy, index, request) {
            Ok(outcome) => outcome,
            Err(err) => return Some(Err(err)),
        };
        debug!(
            index,
            pid = request.pid,
            accepted = outcome.accepted,
            "Request processed"
        );

        self.outcomes.push(outcome);
        self.outcomes.last().map(Ok)
    }

    /// Execute every remaining request and summarize the run
    pub fn run(&mut self) -> MemoryResult<SimulationSummary> {
        while let Some(result) = self.step() {
            result?;
        }
        Ok(self.summary())
    }

    /// Summary of the requests processed so far
    pub fn summary(&self) -> SimulationSummary {
        let mut rejected = RejectionCounts::default();
        for reason in self.outcomes.iter().filter_map(|o| o.reason) {
            match reason {
                RejectReason::NoFit => rejected.no_fit += 1,
                RejectReason::NotFound => rejected.not_found += 1,
                RejectReason::InvalidSize => rejected.invalid_size += 1,
            }
        }
        let accepted = self.outcomes.iter().filter(|o| o.accepted).count();
        self.span.record_outcomes(accepted, rejected.total());

        SimulationSummary {
            run_id: self.span.run_id().to_string(),
            strategy: self.strategy,
            total_requests: self.requests.len(),
            processed: self.outcomes.len(),
            accepted,
            rejected,
            stats: self.manager.stats(),
        }
    }
}

/// Apply one request to the allocator
pub fn execute(
    manager: &mut PartitionManager,
    strategy: FitStrategy,
    index: usize,
    request: Request,
) -> MemoryResult<RequestOutcome> {
    let result = match request.operation {
        Operation::Allocate => manager
            .allocate(strategy, request.size.unwrap_or(0), request.pid)
            .map(|address| (Some(address), None)),
        Operation::Release => manager
            .release(request.pid)
            .map(|released| (None, Some(released))),
    };

    match result {
        Ok((address, released)) => Ok(RequestOutcome {
            index,
            request,
            accepted: true,
            reason: None,
            address,
            released,
        }),
        Err(err) => match RejectReason::from_error(&err) {
            Some(reason) => Ok(RequestOutcome {
                index,
                request,
                accepted: false,
                reason: Some(reason),
                address: None,
                released: None,
            }),
            None => Err(err),
        },
    }
}
