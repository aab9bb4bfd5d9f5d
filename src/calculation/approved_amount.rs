//! Approved amount determination.
//!
//! The approved amount is the smaller of the requested amount and the
//! applicant's limit, converted into the target currency and truncated to
//! whole units.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::{ApplicantRecord, AuditStep};

/// The result of determining the approved amount, including the audit step.
#[derive(Debug, Clone)]
pub struct ApprovedAmountResult {
    /// `min(requested, limit)` in the source currency.
    pub base_amount: Decimal,
    /// The base amount converted and truncated to whole target units.
    pub converted_amount: u64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Determines the approved amount for an applicant.
///
/// # Arguments
///
/// * `applicant` - The applicant record
/// * `exchange_rate` - Target currency units per source unit
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// The source-currency and converted amounts, or `CalculationError` when the
/// converted amount does not fit in a `u64` or is negative.
///
/// # Examples
///
/// ```
/// use loan_engine::calculation::determine_approved_amount;
/// use loan_engine::models::{ApplicantRecord, EmploymentStatus};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let applicant = ApplicantRecord {
///     credit_score: 720,
///     dti_ratio: Decimal::from_str("0.2").unwrap(),
///     employment_status: EmploymentStatus::Employed,
///     requested_loan_amount: Decimal::from(15_000),
///     maximum_loan_limit: Decimal::from(10_000),
/// };
///
/// let result = determine_approved_amount(&applicant, Decimal::from_str("1330.21").unwrap(), 1)
///     .unwrap();
/// assert_eq!(result.base_amount, Decimal::from(10_000));
/// assert_eq!(result.converted_amount, 13_302_100);
/// ```
pub fn determine_approved_amount(
    applicant: &ApplicantRecord,
    exchange_rate: Decimal,
    step_number: u32,
) -> EngineResult<ApprovedAmountResult> {
    let base_amount = applicant
        .requested_loan_amount
        .min(applicant.maximum_loan_limit);
    let capped = base_amount < applicant.requested_loan_amount;

    let converted = base_amount
        .checked_mul(exchange_rate)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "converting {} at rate {} overflows",
                base_amount, exchange_rate
            ),
        })?
        .trunc();

    let converted_amount = converted
        .to_u64()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("converted amount {} is not a whole non-negative amount", converted),
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "approved_amount".to_string(),
        rule_name: "Approved Amount".to_string(),
        input: serde_json::json!({
            "requested_loan_amount": applicant.requested_loan_amount.normalize().to_string(),
            "maximum_loan_limit": applicant.maximum_loan_limit.normalize().to_string(),
            "exchange_rate": exchange_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_amount": base_amount.normalize().to_string(),
            "capped_by_limit": capped,
            "converted_amount": converted_amount
        }),
        reasoning: format!(
            "min({}, {}) = {} x {} = {} (truncated)",
            applicant.requested_loan_amount.normalize(),
            applicant.maximum_loan_limit.normalize(),
            base_amount.normalize(),
            exchange_rate.normalize(),
            converted_amount
        ),
    };

    Ok(ApprovedAmountResult {
        base_amount,
        converted_amount,
        audit_step,
    })
}
