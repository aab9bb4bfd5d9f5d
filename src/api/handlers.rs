//! HTTP request handlers for the Loan Decision Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::ApplicantRecord;

use super::request::DecisionRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/decide", post(decide_handler))
        .with_state(state)
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Well-formed JSON whose fields fail to bind is a validation problem.
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /decide endpoint.
///
/// Accepts a verdict and applicant, and returns the decision result.
async fn decide_handler(
    State(state): State<AppState>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing decision request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: rejection_error(rejection, correlation_id),
            }
            .into_response();
        }
    };

    let application_id = request
        .application_id
        .unwrap_or_else(|| correlation_id.to_string());
    let applicant: ApplicantRecord = request.applicant.into();

    if let Err(err) = applicant.validate() {
        warn!(
            correlation_id = %correlation_id,
            application_id = %application_id,
            error = %err,
            "Applicant validation failed"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    match state
        .pipeline()
        .decide_application(&application_id, request.verdict, &applicant)
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                decision_id = %result.decision_id,
                approved = result.decision.is_approved(),
                duration_us = result.audit_trace.duration_us,
                "Decision completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Decision failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
