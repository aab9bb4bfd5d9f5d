//! Decision result models for the Loan Decision Engine.
//!
//! This module contains the [`LoanDecision`] type and the [`DecisionResult`]
//! envelope that captures a decision together with its audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RepaymentSchedule, Verdict};

/// Korean numeral renderings of the amounts shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumeralStrings {
    /// The approved amount in words, e.g. `일천삼백삼십만이천일백`.
    pub approved_amount: String,
    /// The total repayment (principal plus interest) in words.
    pub total_repayment: String,
}

/// Terms of an approved loan.
///
/// Amounts are whole won after exchange-rate conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedLoan {
    /// The approved principal in won.
    pub approved_amount: u64,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Length of the term in years.
    pub repayment_years: u32,
    /// Amortization outcome for the term.
    pub schedule: RepaymentSchedule,
    /// Principal plus total interest, truncated to whole won.
    pub total_repayment: u64,
    /// Numeral text for the approved amount and the total repayment.
    pub numerals: NumeralStrings,
}

/// The per-applicant outcome of the pipeline.
///
/// # Example
///
/// ```
/// use loan_engine::models::LoanDecision;
///
/// let decision = LoanDecision::Rejected;
/// assert!(!decision.is_approved());
/// assert_eq!(serde_json::to_string(&decision).unwrap(), r#"{"status":"rejected"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoanDecision {
    /// The classifier rejected the application.
    Rejected,
    /// The application was approved on the given terms.
    Approved(ApprovedLoan),
}

impl LoanDecision {
    /// Returns true for [`LoanDecision::Approved`].
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanDecision::Approved(_))
    }

    /// Returns the approved terms, if any.
    pub fn approved(&self) -> Option<&ApprovedLoan> {
        match self {
            LoanDecision::Approved(loan) => Some(loan),
            LoanDecision::Rejected => None,
        }
    }
}

/// A single step in the audit trace recording a decision rule.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while deciding.
///
/// Warnings flag known gaps that don't prevent a decision
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of decision steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated along the way.
    pub warnings: Vec<AuditWarning>,
    /// The total decision duration in microseconds.
    pub duration_us: u64,
}

/// The complete, serializable result of deciding one application.
///
/// # Example
///
/// ```
/// use loan_engine::models::{AuditTrace, DecisionResult, LoanDecision, Verdict};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = DecisionResult {
///     decision_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     application_id: "applicant_001".to_string(),
///     verdict: Verdict::Rejected,
///     decision: LoanDecision::Rejected,
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(!result.decision.is_approved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Unique identifier for this decision.
    pub decision_id: Uuid,
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that made the decision.
    pub engine_version: String,
    /// The application the decision is for.
    pub application_id: String,
    /// The classifier verdict the decision was based on.
    pub verdict: Verdict,
    /// The decision itself.
    pub decision: LoanDecision,
    /// Complete audit trace of decision steps.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepaymentMethod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_loan() -> ApprovedLoan {
        ApprovedLoan {
            approved_amount: 13_302_100,
            interest_rate: dec("3.5"),
            repayment_years: 5,
            schedule: RepaymentSchedule {
                method: RepaymentMethod::EqualInstallment,
                months: 60,
                total_interest: dec("1217204.65"),
                monthly_payment: Some(dec("241988.41")),
            },
            total_repayment: 14_519_304,
            numerals: NumeralStrings {
                approved_amount: "일천삼백삼십만이천일백".to_string(),
                total_repayment: "일천사백오십일만구천삼백사".to_string(),
            },
        }
    }

    #[test]
    fn test_rejected_serializes_with_status_tag() {
        let json = serde_json::to_value(LoanDecision::Rejected).unwrap();
        assert_eq!(json["status"], "rejected");
    }

    #[test]
    fn test_approved_serializes_terms_beside_status_tag() {
        let json = serde_json::to_value(LoanDecision::Approved(create_sample_loan())).unwrap();
        assert_eq!(json["status"], "approved");
        assert_eq!(json["approved_amount"], 13_302_100);
        assert_eq!(json["schedule"]["months"], 60);
        assert_eq!(json["numerals"]["approved_amount"], "일천삼백삼십만이천일백");
    }

    #[test]
    fn test_decision_round_trips_through_json() {
        let decision = LoanDecision::Approved(create_sample_loan());
        let json = serde_json::to_string(&decision).unwrap();
        let back: LoanDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, back);
    }

    #[test]
    fn test_approved_accessor() {
        let decision = LoanDecision::Approved(create_sample_loan());
        assert!(decision.is_approved());
        assert_eq!(decision.approved().unwrap().repayment_years, 5);
        assert!(LoanDecision::Rejected.approved().is_none());
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
        assert_eq!(trace.duration_us, 0);
    }
}
