//! Core data models for the Loan Decision Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod applicant;
mod decision;
mod loan;

pub use applicant::{
    ApplicantRecord, EmploymentStatus, LoanApplication, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
    Verdict,
};
pub use decision::{
    ApprovedLoan, AuditStep, AuditTrace, AuditWarning, DecisionResult, LoanDecision,
    NumeralStrings,
};
pub use loan::{InstallmentRow, RepaymentMethod, RepaymentSchedule};
