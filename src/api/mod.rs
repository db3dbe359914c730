//! HTTP API module for the Net Pay Calculation Engine.
//!
//! This module provides the REST API endpoints for calculating deductions
//! and net pay, and for reading and updating the deduction rule catalogue.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ContributionOverrides, DeductionEntry, UpdateRuleRequest};
pub use response::{ApiError, ApiSuccess, DeductionCalculation, RuleView};
pub use state::AppState;
