//! Loan amortization.
//!
//! This module computes total interest, month count and the fixed monthly
//! payment for the two supported repayment methods, and expands a loan into
//! its month-by-month repayment plan.
//!
//! All arithmetic is done in [`Decimal`]; nothing is rounded here. Callers
//! truncate or round for display.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, InstallmentRow, RepaymentMethod, RepaymentSchedule};

const MONTHS_PER_YEAR: u32 = 12;

/// The result of amortizing a loan, including the audit step.
#[derive(Debug, Clone)]
pub struct AmortizationResult {
    /// The computed schedule.
    pub schedule: RepaymentSchedule,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Loan terms after validation.
struct Terms {
    principal: Decimal,
    monthly_rate: Decimal,
    months: u32,
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("arithmetic overflow computing {}", what),
    }
}

fn validate_terms(principal: Decimal, annual_rate_pct: Decimal, years: u32) -> EngineResult<Terms> {
    if principal < Decimal::ZERO {
        return Err(EngineError::InvalidLoanTerms {
            message: format!("principal must not be negative, got {}", principal),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(EngineError::InvalidLoanTerms {
            message: format!("annual rate must not be negative, got {}%", annual_rate_pct),
        });
    }
    if years == 0 {
        return Err(EngineError::InvalidLoanTerms {
            message: "repayment term must be at least one year".to_string(),
        });
    }

    let months = years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| overflow("month count"))?;

    Ok(Terms {
        principal,
        monthly_rate: annual_rate_pct / Decimal::from(MONTHS_PER_YEAR) / Decimal::ONE_HUNDRED,
        months,
    })
}

/// Fixed payment for an equal-installment loan.
///
/// A zero rate degenerates to `principal / months`; the annuity formula
/// would divide by zero.
fn installment_payment(terms: &Terms) -> EngineResult<Decimal> {
    let months = Decimal::from(terms.months);

    if terms.monthly_rate.is_zero() {
        return Ok(terms.principal / months);
    }

    // P·r / (1 − (1+r)^−n), rewritten as P·r·g / (g − 1) with g = (1+r)^n.
    let growth = (Decimal::ONE + terms.monthly_rate)
        .checked_powu(u64::from(terms.months))
        .ok_or_else(|| overflow("compound growth"))?;

    terms
        .principal
        .checked_mul(terms.monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(growth - Decimal::ONE))
        .ok_or_else(|| overflow("monthly payment"))
}

/// Calculates the repayment schedule for a loan.
///
/// # Arguments
///
/// * `principal` - Amount borrowed
/// * `annual_rate_pct` - Annual interest rate in percent
/// * `years` - Term in years
/// * `method` - Repayment method
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// The schedule and its audit step, or an error if:
/// - The principal or rate is negative, or the term is zero years (`InvalidLoanTerms`)
/// - An intermediate value overflows (`CalculationError`)
///
/// # Examples
///
/// ```
/// use loan_engine::calculation::calculate_amortization;
/// use loan_engine::models::RepaymentMethod;
/// use rust_decimal::Decimal;
///
/// let result = calculate_amortization(
///     Decimal::from(1_200),
///     Decimal::ZERO,
///     1,
///     RepaymentMethod::EqualInstallment,
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.schedule.monthly_payment, Some(Decimal::from(100)));
/// assert_eq!(result.schedule.total_interest, Decimal::ZERO);
/// ```
pub fn calculate_amortization(
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
    method: RepaymentMethod,
    step_number: u32,
) -> EngineResult<AmortizationResult> {
    let terms = validate_terms(principal, annual_rate_pct, years)?;
    let months = Decimal::from(terms.months);

    let (total_interest, monthly_payment) = match method {
        RepaymentMethod::EqualInstallment => {
            let payment = installment_payment(&terms)?;
            let total_payment = payment
                .checked_mul(months)
                .ok_or_else(|| overflow("total payment"))?;
            (total_payment - terms.principal, Some(payment))
        }
        RepaymentMethod::EqualPrincipal => {
            let principal_payment = terms.principal / months;
            let total_interest = (0..terms.months)
                .map(|i| (terms.principal - principal_payment * Decimal::from(i)) * terms.monthly_rate)
                .sum::<Decimal>();
            (total_interest, None)
        }
    };

    let schedule = RepaymentSchedule {
        method,
        months: terms.months,
        total_interest,
        monthly_payment,
    };

    let payment_text = match monthly_payment {
        Some(payment) => format!("fixed monthly payment {}", payment.round_dp(2)),
        None => "monthly payment varies".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "amortization".to_string(),
        rule_name: "Loan Amortization".to_string(),
        input: serde_json::json!({
            "principal": principal.normalize().to_string(),
            "annual_rate": annual_rate_pct.normalize().to_string(),
            "years": years,
            "method": method
        }),
        output: serde_json::json!({
            "months": terms.months,
            "monthly_rate": terms.monthly_rate.to_string(),
            "total_interest": total_interest.to_string(),
            "monthly_payment": monthly_payment.map(|p| p.to_string())
        }),
        reasoning: format!(
            "{} over {} months at {}%: {}, total interest {}",
            method.korean_name(),
            terms.months,
            annual_rate_pct.normalize(),
            payment_text,
            total_interest.round_dp(2)
        ),
    };

    Ok(AmortizationResult {
        schedule,
        audit_step,
    })
}

/// Computes the repayment schedule for a loan.
///
/// Convenience wrapper over [`calculate_amortization`] without the audit step.
///
/// # Examples
///
/// ```
/// use loan_engine::calculation::compute_amortization;
/// use loan_engine::models::RepaymentMethod;
/// use rust_decimal::Decimal;
///
/// let schedule = compute_amortization(
///     Decimal::from(1_000_000),
///     Decimal::from(4),
///     5,
///     RepaymentMethod::EqualPrincipal,
/// )
/// .unwrap();
/// assert_eq!(schedule.months, 60);
/// assert_eq!(schedule.total_interest.round_dp(2), Decimal::new(10_166_667, 2));
/// assert!(schedule.monthly_payment.is_none());
/// ```
pub fn compute_amortization(
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
    method: RepaymentMethod,
) -> EngineResult<RepaymentSchedule> {
    calculate_amortization(principal, annual_rate_pct, years, method, 0).map(|r| r.schedule)
}

/// Expands a loan into its month-by-month repayment plan.
///
/// For equal installments every row carries the same payment and the
/// interest share shrinks over time; for equal principal every row repays
/// the same principal and the payment shrinks. The interest column sums to
/// the schedule's `total_interest`.
pub fn build_installment_plan(
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
    method: RepaymentMethod,
) -> EngineResult<Vec<InstallmentRow>> {
    let terms = validate_terms(principal, annual_rate_pct, years)?;
    let months = Decimal::from(terms.months);

    let fixed_payment = match method {
        RepaymentMethod::EqualInstallment => Some(installment_payment(&terms)?),
        RepaymentMethod::EqualPrincipal => None,
    };
    let principal_payment = terms.principal / months;

    let mut balance = terms.principal;
    let mut rows = Vec::with_capacity(terms.months as usize);

    for month in 1..=terms.months {
        let interest = balance * terms.monthly_rate;
        let (payment, principal_part) = match fixed_payment {
            Some(payment) => (payment, payment - interest),
            None => (principal_payment + interest, principal_payment),
        };
        balance -= principal_part;

        rows.push(InstallmentRow {
            month,
            payment,
            principal: principal_part,
            interest,
            remaining_balance: balance,
        });
    }

    Ok(rows)
}
