//! HTTP API module for the Loan Decision Engine.
//!
//! This module provides the REST endpoint that turns a classifier verdict
//! and an applicant record into a decision with its audit trace.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApplicantRequest, DecisionRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
