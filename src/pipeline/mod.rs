//! Decision orchestration.
//!
//! [`LoanDecisionPipeline`] turns a verdict and an applicant record into a
//! [`crate::models::LoanDecision`]; [`Classifier`] is the seam through which
//! verdicts are supplied.

mod classifier;
mod decision;

pub use classifier::{Classifier, RecordedStatusClassifier};
pub use decision::{ENGINE_VERSION, LoanDecisionPipeline};
