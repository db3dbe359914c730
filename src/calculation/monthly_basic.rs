//! Monthly basic pay derivation.
//!
//! This module derives the basic monthly compensation from the annual salary.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, SalaryBasis};

use super::validate::non_negative;

/// The number of monthly pay periods in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The result of deriving monthly basic pay, including the audit step.
#[derive(Debug, Clone)]
pub struct MonthlyBasicResult {
    /// The derived monthly basic pay.
    pub monthly_basic: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives the monthly basic pay from an annual salary.
///
/// The basic monthly compensation is the annual salary divided by twelve,
/// before allowances and deductions.
///
/// # Arguments
///
/// * `salary` - The salary basis holding the annual salary
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `MonthlyBasicResult` containing the monthly basic pay and an
/// audit step, or `InvalidAmount` if the annual salary is negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_monthly_basic;
/// use netpay_engine::models::SalaryBasis;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let salary = SalaryBasis::new(Decimal::from_str("420000").unwrap());
/// let result = calculate_monthly_basic(&salary, 1).unwrap();
/// assert_eq!(result.monthly_basic, Decimal::from_str("35000").unwrap());
/// ```
pub fn calculate_monthly_basic(
    salary: &SalaryBasis,
    step_number: u32,
) -> EngineResult<MonthlyBasicResult> {
    let annual_salary = non_negative("annual_salary", salary.annual_salary)?;

    let monthly_basic = annual_salary / Decimal::from(MONTHS_PER_YEAR);

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_basic".to_string(),
        rule_name: "Monthly Basic Pay".to_string(),
        reference: "RA 11466 (SSL V)".to_string(),
        input: serde_json::json!({
            "annual_salary": annual_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_basic": monthly_basic.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} = {}",
            annual_salary.normalize(),
            MONTHS_PER_YEAR,
            monthly_basic.normalize()
        ),
    };

    Ok(MonthlyBasicResult {
        monthly_basic,
        audit_step,
    })
}
