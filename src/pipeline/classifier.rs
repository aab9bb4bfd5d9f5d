//! The approval classifier seam.
//!
//! The engine never trains or evaluates a model. Whatever produces the
//! approve/reject verdict is injected through the [`Classifier`] trait.

use crate::models::{LoanApplication, Verdict};

/// Produces an approval verdict for an application.
///
/// Implementations must be shareable across threads so batches can be
/// evaluated in parallel. Closures work directly:
///
/// ```
/// use loan_engine::models::{LoanApplication, Verdict};
/// use loan_engine::pipeline::Classifier;
///
/// let strict = |application: &LoanApplication| {
///     if application.applicant.credit_score > 700 {
///         Verdict::Approved
///     } else {
///         Verdict::Rejected
///     }
/// };
/// fn accepts(_: &impl Classifier) {}
/// accepts(&strict);
/// ```
pub trait Classifier: Send + Sync {
    /// Returns the verdict for one application.
    fn classify(&self, application: &LoanApplication) -> Verdict;
}

impl<F> Classifier for F
where
    F: Fn(&LoanApplication) -> Verdict + Send + Sync,
{
    fn classify(&self, application: &LoanApplication) -> Verdict {
        self(application)
    }
}

/// Uses the `Loan Approval Status` label carried by the input.
///
/// Applications without a label are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedStatusClassifier;

impl Classifier for RecordedStatusClassifier {
    fn classify(&self, application: &LoanApplication) -> Verdict {
        application.recorded_status.unwrap_or(Verdict::Rejected)
    }
}
