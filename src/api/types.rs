//! API response types.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Serialize;

use crate::error::EstimateError;
use crate::estimate::financing::InstallmentPlan;

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Installment options for one form submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansResponse {
    pub total_cost: f64,
    pub plans: Vec<InstallmentPlan>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

pub fn bad_request(err: &EstimateError) -> ApiError {
    error_response(err.to_string())
}

/// Maps a body that failed to parse (wrong type, missing field, bad JSON,
/// wrong content type) onto the same 400 `{error}` shape.
pub fn invalid_body(rejection: &JsonRejection) -> ApiError {
    error_response(format!("invalid request body: {}", rejection.body_text()))
}
