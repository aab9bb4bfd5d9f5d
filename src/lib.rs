//! Loan Decision Engine
//!
//! This crate turns a classifier's approve/reject verdict and an applicant
//! record into concrete loan terms: the approved amount in won, an interest
//! rate from ordered rule tables, an amortization schedule, Korean numeral
//! text for the amounts, and an applicant-facing report.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod report;
