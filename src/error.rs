//! Error types for the Loan Decision Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while deciding a loan.

use thiserror::Error;

/// The main error type for the Loan Decision Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use loan_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedMethod {
///     method: "balloon".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported repayment method: balloon");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The repayment method is not one the engine knows how to amortize.
    #[error("Unsupported repayment method: {method}")]
    UnsupportedMethod {
        /// The method name as supplied.
        method: String,
    },

    /// An applicant record was invalid or contained out-of-range data.
    #[error("Invalid applicant field '{field}': {message}")]
    InvalidApplicant {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Principal, rate or term cannot be amortized.
    #[error("Invalid loan terms: {message}")]
    InvalidLoanTerms {
        /// A description of the offending term.
        message: String,
    },

    /// Tabular applicant input could not be read.
    #[error("Failed to read applicant row {row}: {message}")]
    IngestError {
        /// The 1-based data row (header excluded), or 0 for file-level errors.
        row: usize,
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
