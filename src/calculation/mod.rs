//! Calculation logic for the Loan Decision Engine.
//!
//! This module contains the deterministic finance core: approved amount
//! determination, interest rate rule evaluation, loan amortization and the
//! Korean numeral rendering of won amounts.

mod amortization;
mod approved_amount;
mod interest_rate;
mod numeral;

pub use amortization::{
    AmortizationResult, build_installment_plan, calculate_amortization, compute_amortization,
};
pub use approved_amount::{ApprovedAmountResult, determine_approved_amount};
pub use interest_rate::{
    InterestRateResult, RateAdjustment, TierMatch, calculate_interest_rate, compute_rate,
    evaluate_table,
};
pub use numeral::format_currency_numeral;
