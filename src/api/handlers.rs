//! HTTP request handlers for the rate engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_basic_rate, cost_resource, inherited_field, total_deductions,
};
use crate::error::EngineResult;
use crate::models::{ResourceCosting, ResourceType, WorkArrangementForm};

use super::request::{CalculatorRequest, CostResourceRequest, ResolveRateRequest};
use super::response::{
    ApiError, ApiErrorResponse, BasicRateResponse, ResolveRateResponse, RolesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roles", get(list_roles_handler))
        .route("/rates/resolve", post(resolve_rate_handler))
        .route("/rates/basic", post(basic_rate_handler))
        .route("/calculator", post(calculator_handler))
        .route("/resources/cost", post(cost_resource_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field path
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    };
    ApiErrorResponse::bad_request(error)
}

fn engine_error(correlation_id: Uuid, err: crate::error::EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}

/// Handler for GET /roles.
///
/// Lists every role on the rate card with its arrangement tables.
async fn list_roles_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let card = state.card();
    info!(
        correlation_id = %correlation_id,
        roles = card.roles().len(),
        "Listing roles"
    );

    json_ok(RolesResponse {
        rate_card: card.metadata().clone(),
        roles: card.roles().to_vec(),
    })
}

/// Handler for POST /rates/resolve.
///
/// A missing role or arrangement is not an error: the response carries a
/// `null` rate and the caller falls back to manual entry.
async fn resolve_rate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveRateRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate resolution request");

    let Json(request) = payload.map_err(|rejection| rejection_error(correlation_id, rejection))?;

    let source_field = inherited_field(ResourceType::from_label(&request.resource_type));
    let rate = state.card().resolve_rate_by_label(
        &request.role,
        &request.work_arrangement,
        &request.resource_type,
    );

    info!(
        correlation_id = %correlation_id,
        role = %request.role,
        work_arrangement = %request.work_arrangement,
        resolved = rate.is_some(),
        "Rate resolved"
    );

    Ok(json_ok(ResolveRateResponse { rate, source_field }))
}

/// Handler for POST /rates/basic.
///
/// Form fields are parsed leniently: blank or non-numeric values count as zero.
async fn basic_rate_handler(
    payload: Result<Json<WorkArrangementForm>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing basic rate request");

    let Json(form) = payload.map_err(|rejection| rejection_error(correlation_id, rejection))?;

    let rates = form.to_rates();
    let deductions =
        total_deductions(&rates).map_err(|err| engine_error(correlation_id, err))?;
    let basic_rate =
        compute_basic_rate(&rates).map_err(|err| engine_error(correlation_id, err))?;
    let body = BasicRateResponse {
        total_deductions: deductions,
        basic_rate,
    };

    info!(
        correlation_id = %correlation_id,
        basic_rate = %body.basic_rate,
        "Basic rate computed"
    );

    Ok(json_ok(body))
}

/// Handler for POST /calculator.
async fn calculator_handler(
    payload: Result<Json<CalculatorRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculator request");

    let Json(request) = payload.map_err(|rejection| rejection_error(correlation_id, rejection))?;
    let inputs = request
        .into_inputs()
        .map_err(|err| engine_error(correlation_id, err))?;
    let outputs = inputs
        .outputs()
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        tolerance = %outputs.tolerance,
        basic_rate = %outputs.basic_rate,
        "Calculator completed"
    );

    Ok(json_ok(outputs))
}

/// Handler for POST /resources/cost.
///
/// Accepts the assignment step of the resource form and returns the costing
/// with its audit trace.
async fn cost_resource_handler(
    State(state): State<AppState>,
    payload: Result<Json<CostResourceRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing resource costing request");

    let Json(request) = payload.map_err(|rejection| rejection_error(correlation_id, rejection))?;

    let start_time = Instant::now();
    let costing =
        perform_costing(&state, request).map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        role = %costing.inherited.role,
        daily_rate = %costing.daily_rate,
        earnings = %costing.earnings,
        profit = %costing.profit,
        duration_us = start_time.elapsed().as_micros(),
        "Costing completed successfully"
    );

    Ok(json_ok(costing))
}

/// Validates the form, checks the role against the rate card, then costs the
/// assignment.
fn perform_costing(
    state: &AppState,
    request: CostResourceRequest,
) -> EngineResult<ResourceCosting> {
    let assignment = request.into_assignment()?;
    state.config().get_role(&assignment.role)?;
    cost_resource(state.card(), &assignment)
}
