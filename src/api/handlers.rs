//! HTTP request handlers for the Net Pay Calculation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_net_pay;

use super::request::{CalculationRequest, UpdateRuleRequest};
use super::response::{ApiError, ApiErrorResponse, ApiSuccess, DeductionCalculation, RuleView};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/deductions/calculate", post(calculate_handler))
        .route("/deductions/tax-brackets", get(tax_brackets_handler))
        .route("/deductions/rules", get(list_rules_handler))
        .route("/deductions/rules/:id", put(update_rule_handler))
        .with_state(state)
}

/// Triage for a rejected JSON request body.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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

/// Handler for POST /deductions/calculate endpoint.
///
/// Accepts a calculation request and returns the deduction calculation in
/// the `{ error, data }` envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Resolve contribution defaults for the pay period
    let effective_date = request.pay_period.first_day();
    let defaults = match state.config().contribution_defaults(effective_date) {
        Ok(defaults) => defaults,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                pay_period = %request.pay_period,
                "No contribution table for pay period"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    // Build the calculator input and run the one authoritative formula
    let rule_amounts = state.rule_amounts();
    let result = request
        .build_calculator_input(defaults, state.config().default_tax_rate(), &rule_amounts)
        .and_then(|input| {
            let calculation = calculate_net_pay(&input)?;
            Ok(DeductionCalculation::from_calculation(
                request.employee_id.clone(),
                request.pay_period,
                request.basic_pay,
                &input,
                calculation,
            ))
        });

    match result {
        Ok(calculation) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %calculation.employee_id,
                pay_period = %calculation.pay_period,
                net_pay = %calculation.net_pay,
                duration_us = calculation.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiSuccess::new(calculation)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /deductions/tax-brackets endpoint.
///
/// Serves the informational monthly tax bracket table from configuration.
async fn tax_brackets_handler(State(state): State<AppState>) -> impl IntoResponse {
    let brackets = state.config().withholding().brackets.clone();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiSuccess::new(brackets)),
    )
}

/// Handler for GET /deductions/rules endpoint.
///
/// Lists the fixed deduction rules with their current default amounts.
async fn list_rules_handler(State(state): State<AppState>) -> impl IntoResponse {
    let amounts = state.rule_amounts();
    let mut rules: Vec<RuleView> = state
        .config()
        .deduction_rules()
        .iter()
        .map(|(id, rule)| {
            let amount = amounts.get(id).copied().unwrap_or(rule.default_amount);
            RuleView::from_rule(id, rule, amount)
        })
        .collect();
    rules.sort_by(|a, b| a.id.cmp(&b.id));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiSuccess::new(rules)),
    )
}

/// Handler for PUT /deductions/rules/:id endpoint.
///
/// Updates the default amount of one deduction rule.
async fn update_rule_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRuleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let result = state
        .set_rule_amount(&id, request.default_amount)
        .and_then(|amount| {
            let rule = state.config().deduction_rule(&id)?;
            Ok(RuleView::from_rule(&id, rule, amount))
        });

    match result {
        Ok(view) => {
            info!(
                correlation_id = %correlation_id,
                rule_id = %id,
                default_amount = %view.default_amount,
                "Deduction rule updated"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiSuccess::new(view)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                rule_id = %id,
                error = %err,
                "Deduction rule update failed"
            );
            let mut api_error: ApiErrorResponse = err.into();
            // An unknown id on the rules resource is a missing resource
            if api_error.error.code == "DEDUCTION_RULE_NOT_FOUND" {
                api_error.status = StatusCode::NOT_FOUND;
            }
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
