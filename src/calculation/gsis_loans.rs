//! GSIS loan amortization aggregation.
//!
//! This module sums the six GSIS loan amortizations collected through
//! payroll: consolidated, emergency, policy, optional, MPL, and MPL Live.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, GsisLoans};

use super::validate::non_negative;

/// The result of the GSIS loan aggregation, including the audit step.
#[derive(Debug, Clone)]
pub struct GsisLoansResult {
    /// The sum of the GSIS loan amortizations.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the GSIS loan amortizations.
///
/// # Arguments
///
/// * `loans` - The six GSIS loan amortization amounts
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `GsisLoansResult` containing the total and an audit step, or
/// `InvalidAmount` if any amount is negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_gsis_loans_total;
/// use netpay_engine::models::GsisLoans;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loans = GsisLoans {
///     conso: Decimal::from_str("2500").unwrap(),
///     emergency: Decimal::from_str("800").unwrap(),
///     ..GsisLoans::default()
/// };
///
/// let result = calculate_gsis_loans_total(&loans, 1).unwrap();
/// assert_eq!(result.total, Decimal::from_str("3300").unwrap());
/// ```
pub fn calculate_gsis_loans_total(
    loans: &GsisLoans,
    step_number: u32,
) -> EngineResult<GsisLoansResult> {
    let mut total = Decimal::ZERO;
    for (name, amount) in loans.line_items() {
        total += non_negative(name, amount)?;
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "gsis_loans".to_string(),
        rule_name: "GSIS Loan Amortizations".to_string(),
        reference: "RA 8291".to_string(),
        input: serde_json::json!({
            "conso": loans.conso.normalize().to_string(),
            "emergency": loans.emergency.normalize().to_string(),
            "policy_loan": loans.policy_loan.normalize().to_string(),
            "optional": loans.optional.normalize().to_string(),
            "mpl": loans.mpl.normalize().to_string(),
            "mpl_live": loans.mpl_live.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!("Sum of 6 GSIS loan amortizations = {}", total.normalize()),
    };

    Ok(GsisLoansResult { total, audit_step })
}
