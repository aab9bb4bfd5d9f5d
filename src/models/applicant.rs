//! Applicant model and related types.
//!
//! This module defines the [`ApplicantRecord`] consumed by the decision
//! pipeline, the [`Verdict`] produced by the external classifier and the
//! [`LoanApplication`] that pairs a record with its tabular identity.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lowest credit score accepted by [`ApplicantRecord::validate`].
pub const MIN_CREDIT_SCORE: u32 = 300;

/// Highest credit score accepted by [`ApplicantRecord::validate`].
pub const MAX_CREDIT_SCORE: u32 = 850;

/// The applicant's employment situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Salaried employment.
    #[serde(alias = "Employed")]
    Employed,
    /// Runs their own business.
    #[serde(alias = "Self-employed", alias = "self-employed")]
    SelfEmployed,
    /// No current employment income.
    #[serde(alias = "Unemployed")]
    Unemployed,
}

impl EmploymentStatus {
    /// Returns the label used in tabular input.
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "Employed",
            EmploymentStatus::SelfEmployed => "Self-employed",
            EmploymentStatus::Unemployed => "Unemployed",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmploymentStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "employed" => Ok(EmploymentStatus::Employed),
            "self-employed" => Ok(EmploymentStatus::SelfEmployed),
            "unemployed" => Ok(EmploymentStatus::Unemployed),
            _ => Err(EngineError::InvalidApplicant {
                field: "employment_status".to_string(),
                message: format!("unknown employment status '{}'", s),
            }),
        }
    }
}

/// The outcome produced by the external approval classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The classifier approved the application.
    Approved,
    /// The classifier rejected the application.
    Rejected,
}

impl Verdict {
    /// Returns true for [`Verdict::Approved`].
    pub fn is_approved(&self) -> bool {
        *self == Verdict::Approved
    }
}

impl FromStr for Verdict {
    type Err = EngineError;

    /// Parses the label column of tabular input.
    ///
    /// Accepts `Approved`/`Rejected` in any case, and the label-encoded
    /// forms `1`/`0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" | "1" => Ok(Verdict::Approved),
            "rejected" | "0" => Ok(Verdict::Rejected),
            _ => Err(EngineError::InvalidApplicant {
                field: "loan_approval_status".to_string(),
                message: format!("unknown approval status '{}'", s),
            }),
        }
    }
}

/// The applicant attributes the finance core depends on.
///
/// Records are sourced externally (CSV ingestion or the HTTP API) and never
/// modified afterwards. Ranges are checked by [`ApplicantRecord::validate`];
/// the calculation functions assume a validated record.
///
/// # Example
///
/// ```
/// use loan_engine::models::{ApplicantRecord, EmploymentStatus};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let applicant = ApplicantRecord {
///     credit_score: 720,
///     dti_ratio: Decimal::from_str("0.32").unwrap(),
///     employment_status: EmploymentStatus::Employed,
///     requested_loan_amount: Decimal::from(15_000),
///     maximum_loan_limit: Decimal::from(12_000),
/// };
/// assert!(applicant.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Credit score in the 300-850 range.
    pub credit_score: u32,
    /// Debt-to-income ratio between 0 and 1.
    pub dti_ratio: Decimal,
    /// Employment situation.
    pub employment_status: EmploymentStatus,
    /// The amount the applicant asked for, in the source currency.
    pub requested_loan_amount: Decimal,
    /// The maximum the applicant may borrow, in the source currency.
    pub maximum_loan_limit: Decimal,
}

impl ApplicantRecord {
    /// Checks every field against its documented range.
    ///
    /// Returns the first offending field as [`EngineError::InvalidApplicant`].
    pub fn validate(&self) -> EngineResult<()> {
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&self.credit_score) {
            return Err(invalid(
                "credit_score",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_CREDIT_SCORE, MAX_CREDIT_SCORE, self.credit_score
                ),
            ));
        }

        if self.dti_ratio < Decimal::ZERO || self.dti_ratio > Decimal::ONE {
            return Err(invalid(
                "dti_ratio",
                format!("must be between 0 and 1, got {}", self.dti_ratio),
            ));
        }

        if self.requested_loan_amount <= Decimal::ZERO {
            return Err(invalid(
                "requested_loan_amount",
                format!("must be positive, got {}", self.requested_loan_amount),
            ));
        }

        if self.maximum_loan_limit < Decimal::ZERO {
            return Err(invalid(
                "maximum_loan_limit",
                format!("must not be negative, got {}", self.maximum_loan_limit),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidApplicant {
        field: field.to_string(),
        message,
    }
}

/// One applicant as it arrives from tabular input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Identifier of the row or request.
    pub id: String,
    /// The typed applicant attributes.
    pub applicant: ApplicantRecord,
    /// The `Loan Approval Status` label, when the input carries one.
    #[serde(default)]
    pub recorded_status: Option<Verdict>,
}
