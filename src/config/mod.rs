//! Configuration loading and management for the Loan Decision Engine.
//!
//! This module loads the loan policy from YAML files: the pipeline settings
//! (exchange rate, term, repayment method) and the interest rate rule tables.
//!
//! # Example
//!
//! ```no_run
//! use loan_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Base rate: {}", config.policy().rates().base_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CurrencyMetadata, EmploymentAdjustments, LoanPolicy, PipelineSettings, RatePolicy,
    ThresholdTable, ThresholdTier,
};
