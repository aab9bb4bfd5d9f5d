//! Interest rate rule evaluation.
//!
//! The annual rate is the policy's base rate plus four independent
//! adjustments: credit score, debt-to-income ratio, employment status and
//! loan amount. Each threshold table is evaluated top to bottom and the
//! first tier whose threshold is strictly exceeded wins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{RatePolicy, ThresholdTable};
use crate::models::{AuditStep, EmploymentStatus};

/// Which tier of a rule table produced an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum TierMatch {
    /// The tier at this position in the table matched.
    Tier(usize),
    /// No tier matched; the table's `otherwise` value applied.
    Otherwise,
}

/// One rule table's contribution to the rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateAdjustment {
    /// Identifier of the rule table (e.g., "credit_score").
    pub rule_id: String,
    /// The value the table was evaluated against.
    pub value: String,
    /// The tier that matched.
    pub matched: TierMatch,
    /// Percentage points added to the rate.
    pub adjustment: Decimal,
}

/// The result of evaluating the rate rules, including the audit step.
#[derive(Debug, Clone)]
pub struct InterestRateResult {
    /// Annual rate in percent. Neither clamped nor rounded.
    pub rate: Decimal,
    /// Adjustments in evaluation order: credit score, DTI, employment, loan amount.
    pub adjustments: Vec<RateAdjustment>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Evaluates a threshold table against a value.
///
/// Tiers are tried in listed order; the first with `value > above` wins.
/// The table is never re-sorted, so a tier shadowed by an earlier, looser
/// tier stays unreachable.
///
/// # Example
///
/// ```
/// use loan_engine::calculation::{evaluate_table, TierMatch};
/// use loan_engine::config::RatePolicy;
/// use rust_decimal::Decimal;
///
/// let policy = RatePolicy::default();
/// let (matched, adjustment) = evaluate_table(&policy.loan_amount, Decimal::from(150_000));
/// assert_eq!(matched, TierMatch::Tier(0));
/// assert_eq!(adjustment, Decimal::new(5, 1));
/// ```
pub fn evaluate_table(table: &ThresholdTable, value: Decimal) -> (TierMatch, Decimal) {
    table
        .tiers
        .iter()
        .enumerate()
        .find(|(_, tier)| value > tier.above)
        .map(|(index, tier)| (TierMatch::Tier(index), tier.adjustment))
        .unwrap_or((TierMatch::Otherwise, table.otherwise))
}

/// Calculates an applicant's annual interest rate under the given policy.
///
/// # Arguments
///
/// * `credit_score` - The applicant's credit score
/// * `dti_ratio` - The applicant's debt-to-income ratio
/// * `loan_amount` - The loan amount the amount tiers are evaluated against
/// * `employment_status` - The applicant's employment status
/// * `policy` - The rate rules
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use loan_engine::calculation::calculate_interest_rate;
/// use loan_engine::config::RatePolicy;
/// use loan_engine::models::EmploymentStatus;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_interest_rate(
///     600,
///     Decimal::from_str("0.45").unwrap(),
///     Decimal::from(60_000),
///     EmploymentStatus::Unemployed,
///     &RatePolicy::default(),
///     1,
/// );
/// assert_eq!(result.rate, Decimal::from(8));
/// assert_eq!(result.adjustments.len(), 4);
/// ```
pub fn calculate_interest_rate(
    credit_score: u32,
    dti_ratio: Decimal,
    loan_amount: Decimal,
    employment_status: EmploymentStatus,
    policy: &RatePolicy,
    step_number: u32,
) -> InterestRateResult {
    let (credit_match, credit_adj) =
        evaluate_table(&policy.credit_score, Decimal::from(credit_score));
    let (dti_match, dti_adj) = evaluate_table(&policy.dti_ratio, dti_ratio);
    let employment_adj = policy.employment.for_status(employment_status);
    let (amount_match, amount_adj) = evaluate_table(&policy.loan_amount, loan_amount);

    let adjustments = vec![
        RateAdjustment {
            rule_id: "credit_score".to_string(),
            value: credit_score.to_string(),
            matched: credit_match,
            adjustment: credit_adj,
        },
        RateAdjustment {
            rule_id: "dti_ratio".to_string(),
            value: dti_ratio.normalize().to_string(),
            matched: dti_match,
            adjustment: dti_adj,
        },
        RateAdjustment {
            rule_id: "employment_status".to_string(),
            value: employment_status.label().to_string(),
            matched: TierMatch::Otherwise,
            adjustment: employment_adj,
        },
        RateAdjustment {
            rule_id: "loan_amount".to_string(),
            value: loan_amount.normalize().to_string(),
            matched: amount_match,
            adjustment: amount_adj,
        },
    ];

    let rate = policy.base_rate + adjustments.iter().map(|a| a.adjustment).sum::<Decimal>();

    let terms = adjustments
        .iter()
        .map(|a| format!("{} ({})", signed(a.adjustment), a.rule_id))
        .collect::<Vec<_>>()
        .join(" ");

    let audit_step = AuditStep {
        step_number,
        rule_id: "interest_rate".to_string(),
        rule_name: "Interest Rate Rules".to_string(),
        input: serde_json::json!({
            "credit_score": credit_score,
            "dti_ratio": dti_ratio.normalize().to_string(),
            "employment_status": employment_status,
            "loan_amount": loan_amount.normalize().to_string(),
            "base_rate": policy.base_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "adjustments": adjustments
        }),
        reasoning: format!(
            "{} {} = {}%",
            policy.base_rate.normalize(),
            terms,
            rate.normalize()
        ),
    };

    InterestRateResult {
        rate,
        adjustments,
        audit_step,
    }
}

/// Computes an applicant's annual interest rate under the default policy.
///
/// # Examples
///
/// ```
/// use loan_engine::calculation::compute_rate;
/// use loan_engine::models::EmploymentStatus;
/// use rust_decimal::Decimal;
///
/// let rate = compute_rate(751, Decimal::ZERO, Decimal::ZERO, EmploymentStatus::Employed);
/// assert_eq!(rate, Decimal::from(3));
/// ```
pub fn compute_rate(
    credit_score: u32,
    dti_ratio: Decimal,
    loan_amount: Decimal,
    employment_status: EmploymentStatus,
) -> Decimal {
    calculate_interest_rate(
        credit_score,
        dti_ratio,
        loan_amount,
        employment_status,
        &RatePolicy::default(),
        0,
    )
    .rate
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        format!("- {}", value.abs().normalize())
    } else {
        format!("+ {}", value.normalize())
    }
}
