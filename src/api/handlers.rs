//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use super::AppState;
use super::types::{ApiError, PlansResponse, bad_request, invalid_body};
use crate::estimate::financing::installment_plans;
use crate::estimate::location::LocationInfo;
use crate::estimate::types::{CalculatorInput, CalculatorResult};
use crate::io::report::ReportSnapshot;

/// `GET /locations` → 200 + cities sorted by key
pub async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Vec<LocationInfo>> {
    Json(state.estimator.sun_hours.locations())
}

type FormBody = Result<Json<CalculatorInput>, JsonRejection>;

fn form_input(body: FormBody) -> Result<CalculatorInput, ApiError> {
    body.map(|Json(input)| input).map_err(|e| invalid_body(&e))
}

/// `POST /estimate` → 200 + `CalculatorResult`, or 400 on invalid fields
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    body: FormBody,
) -> Result<Json<CalculatorResult>, ApiError> {
    let input = form_input(body)?;
    state
        .estimator
        .compute(&input)
        .map(Json)
        .map_err(|e| bad_request(&e))
}

/// `POST /report` → 200 + `{formData, results, generatedAt}`
pub async fn report(
    State(state): State<Arc<AppState>>,
    body: FormBody,
) -> Result<Json<ReportSnapshot>, ApiError> {
    let input = form_input(body)?;
    let results = state.estimator.compute(&input).map_err(|e| bad_request(&e))?;
    Ok(Json(ReportSnapshot::now(input, results)))
}

/// `POST /plans` → 200 + one installment plan per configured term
pub async fn plans(
    State(state): State<Arc<AppState>>,
    body: FormBody,
) -> Result<Json<PlansResponse>, ApiError> {
    let input = form_input(body)?;
    let result = state.estimator.compute(&input).map_err(|e| bad_request(&e))?;
    Ok(Json(PlansResponse {
        total_cost: result.total_cost,
        plans: installment_plans(result.total_cost, &state.terms_months),
    }))
}
