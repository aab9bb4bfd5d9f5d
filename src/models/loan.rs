//! Repayment models.
//!
//! This module defines the [`RepaymentMethod`] choices, the aggregate
//! [`RepaymentSchedule`] produced by the amortization engine, and the
//! per-month [`InstallmentRow`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How the principal is paid back over the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RepaymentMethod {
    /// Fixed total payment every month (원리금 균등 상환).
    EqualInstallment,
    /// Fixed principal portion every month (원금 균등 상환).
    EqualPrincipal,
}

impl RepaymentMethod {
    /// Returns the Korean name used in customer-facing reports.
    pub fn korean_name(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualInstallment => "원리금 균등 상환",
            RepaymentMethod::EqualPrincipal => "원금 균등 상환",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepaymentMethod::EqualInstallment => f.write_str("equal_installment"),
            RepaymentMethod::EqualPrincipal => f.write_str("equal_principal"),
        }
    }
}

impl FromStr for RepaymentMethod {
    type Err = EngineError;

    /// Parses either the machine name or the Korean name of a method.
    ///
    /// # Example
    ///
    /// ```
    /// use loan_engine::models::RepaymentMethod;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(
    ///     RepaymentMethod::from_str("원금 균등 상환").unwrap(),
    ///     RepaymentMethod::EqualPrincipal
    /// );
    /// assert!(RepaymentMethod::from_str("balloon").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().replace('-', "_").as_str() {
            "equal_installment" | "원리금 균등 상환" => Ok(RepaymentMethod::EqualInstallment),
            "equal_principal" | "원금 균등 상환" => Ok(RepaymentMethod::EqualPrincipal),
            _ => Err(EngineError::UnsupportedMethod {
                method: trimmed.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for RepaymentMethod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Aggregate outcome of amortizing a loan.
///
/// # Example
///
/// ```
/// use loan_engine::models::{RepaymentMethod, RepaymentSchedule};
/// use rust_decimal::Decimal;
///
/// let schedule = RepaymentSchedule {
///     method: RepaymentMethod::EqualPrincipal,
///     months: 60,
///     total_interest: Decimal::new(10_166_667, 2),
///     monthly_payment: None,
/// };
/// assert!(schedule.monthly_payment.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    /// The method the schedule was computed with.
    pub method: RepaymentMethod,
    /// Number of monthly payments.
    pub months: u32,
    /// Interest paid over the whole term.
    pub total_interest: Decimal,
    /// The fixed monthly payment; `None` when payments vary per month.
    pub monthly_payment: Option<Decimal>,
}

/// One month of a repayment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRow {
    /// 1-based month number.
    pub month: u32,
    /// Total paid this month.
    pub payment: Decimal,
    /// Portion of the payment that reduces the principal.
    pub principal: Decimal,
    /// Portion of the payment that is interest.
    pub interest: Decimal,
    /// Principal still owed after this payment.
    pub remaining_balance: Decimal,
}
