//! Response types for the Net Pay Calculation Engine API.
//!
//! Every endpoint answers with the same envelope: `{ "error": false,
//! "data": ... }` on success, `{ "error": true, "code": ..., "message": ... }`
//! on failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{DeductionCategory, DeductionRule};
use crate::error::EngineError;
use crate::models::{AuditTrace, CalculatorInput, HesSubsidy, NetPayCalculation, PayPeriod};

use super::request::DeductionEntry;

/// Success envelope wrapping a response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    /// Always `false` for a success response.
    pub error: bool,
    /// The response payload.
    pub data: T,
}

impl<T> ApiSuccess<T> {
    /// Wraps a payload in the success envelope.
    pub fn new(data: T) -> Self {
        Self { error: false, data }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `true` for an error response.
    pub error: bool,
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a deduction rule not found error response.
    pub fn rule_not_found(name: &str) -> Self {
        Self::with_details(
            "DEDUCTION_RULE_NOT_FOUND",
            format!("Deduction rule not found: {}", name),
            format!("The rule id '{}' is not in the fixed deduction line set", name),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::RateNotFound { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_NOT_FOUND",
                    format!("No contribution table effective on date {}", date),
                    "The pay period predates every configured contribution table",
                ),
            },
            EngineError::DeductionRuleNotFound { name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::rule_not_found(&name),
            },
            EngineError::InvalidPayPeriod { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PAY_PERIOD",
                    format!("Invalid pay period '{}'", value),
                    "Pay periods are written as YYYY-MM",
                ),
            },
            EngineError::InvalidTaxRate { rate } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TAX_RATE",
                    format!("Invalid tax rate {}%", rate),
                    "The basic-pay withholding rate must lie between 0 and 50 percent",
                ),
            },
            EngineError::InvalidAmount { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount for '{}': {}", field, message),
                    "Monetary inputs must be non-negative",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

/// The deduction calculation payload returned by `/deductions/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionCalculation {
    /// Identifier of the employee the calculation is for.
    pub employee_id: String,
    /// The pay period the calculation applies to.
    pub pay_period: PayPeriod,
    /// The monthly basic pay the calculation started from.
    pub basic_pay: Decimal,
    /// Withholding tax on the monthly basic pay.
    pub tax_amount: Decimal,
    /// The SSS contribution deducted.
    pub sss_deduction: Decimal,
    /// The PhilHealth premium deducted.
    pub philhealth_deduction: Decimal,
    /// The Pag-IBIG contribution deducted.
    pub pagibig_deduction: Decimal,
    /// The GSIS loan amortization total.
    pub gsis_loans_total: Decimal,
    /// The non-zero other-deduction line items.
    pub other_deductions: Vec<DeductionEntry>,
    /// The other-deduction total.
    pub total_other_deductions: Decimal,
    /// Every deduction applied against the monthly basic pay.
    pub total_deductions: Decimal,
    /// Net pay for the month.
    pub net_pay: Decimal,
    /// Net pay annualized.
    pub annual_net_pay: Decimal,
    /// The HES breakdown.
    pub hes: HesSubsidy,
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Complete audit trace of calculation steps.
    pub audit_trace: AuditTrace,
}

impl DeductionCalculation {
    /// Assembles the response payload from the resolved input and the
    /// calculation result.
    pub fn from_calculation(
        employee_id: String,
        pay_period: PayPeriod,
        basic_pay: Decimal,
        input: &CalculatorInput,
        calculation: NetPayCalculation,
    ) -> Self {
        let other_deductions = input
            .other_deductions
            .line_items()
            .into_iter()
            .filter(|(_, amount)| *amount != Decimal::ZERO)
            .map(|(name, amount)| DeductionEntry {
                name: name.to_string(),
                amount,
            })
            .collect();

        Self {
            employee_id,
            pay_period,
            basic_pay,
            tax_amount: calculation.tax_deduction,
            sss_deduction: input.contributions.sss,
            philhealth_deduction: input.contributions.philhealth,
            pagibig_deduction: input.contributions.pagibig,
            gsis_loans_total: calculation.gsis_loans_total,
            other_deductions,
            total_other_deductions: calculation.totals.total_other_deductions,
            total_deductions: calculation.totals.total_deductions,
            net_pay: calculation.totals.monthly_net_pay,
            annual_net_pay: calculation.totals.annual_net_pay,
            hes: calculation.hes,
            calculation_id: calculation.calculation_id,
            timestamp: calculation.timestamp,
            engine_version: calculation.engine_version,
            audit_trace: calculation.audit_trace,
        }
    }
}

/// One deduction rule as served by the rules endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleView {
    /// The rule id (the line-item field name).
    pub id: String,
    /// The human-readable name of the deduction.
    pub name: String,
    /// The category of the deduction.
    pub category: DeductionCategory,
    /// A description of the deduction.
    pub description: String,
    /// The current default amount for the rule.
    pub default_amount: Decimal,
}

impl RuleView {
    /// Builds a view from a configured rule and its current default amount.
    pub fn from_rule(id: &str, rule: &DeductionRule, default_amount: Decimal) -> Self {
        Self {
            id: id.to_string(),
            name: rule.name.clone(),
            category: rule.category,
            description: rule.description.clone(),
            default_amount,
        }
    }
}
