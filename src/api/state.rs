//! Application state for the Loan Decision Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::LoanPolicy;
use crate::pipeline::LoanDecisionPipeline;

/// Shared application state.
///
/// Holds the decision pipeline built from the loaded policy. The pipeline
/// is immutable, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<LoanDecisionPipeline>,
}

impl AppState {
    /// Creates a new application state for the given policy.
    pub fn new(policy: LoanPolicy) -> Self {
        Self {
            pipeline: Arc::new(LoanDecisionPipeline::new(policy)),
        }
    }

    /// Returns the decision pipeline.
    pub fn pipeline(&self) -> &LoanDecisionPipeline {
        &self.pipeline
    }
}
