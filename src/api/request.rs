//! Request types for the Loan Decision Engine API.
//!
//! This module defines the JSON request structure for the `/decide` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ApplicantRecord, EmploymentStatus, Verdict};

/// Request body for the `/decide` endpoint.
///
/// The verdict comes from the caller's classifier; the engine only computes
/// the loan terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Caller-supplied identifier; the correlation id is used when absent.
    #[serde(default)]
    pub application_id: Option<String>,
    /// The classifier verdict.
    pub verdict: Verdict,
    /// The applicant attributes.
    pub applicant: ApplicantRequest,
}

/// Applicant information in a decision request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRequest {
    /// Credit score (300-850).
    pub credit_score: u32,
    /// Debt-to-income ratio (0-1).
    pub dti_ratio: Decimal,
    /// Employment status, e.g. `employed` or `self_employed`.
    pub employment_status: EmploymentStatus,
    /// Requested amount in the source currency.
    pub requested_loan_amount: Decimal,
    /// Borrowing limit in the source currency.
    pub maximum_loan_limit: Decimal,
}

impl From<ApplicantRequest> for ApplicantRecord {
    fn from(req: ApplicantRequest) -> Self {
        ApplicantRecord {
            credit_score: req.credit_score,
            dti_ratio: req.dti_ratio,
            employment_status: req.employment_status,
            requested_loan_amount: req.requested_loan_amount,
            maximum_loan_limit: req.maximum_loan_limit,
        }
    }
}
