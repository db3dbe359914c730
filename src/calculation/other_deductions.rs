//! Other-deduction line-item aggregation.
//!
//! This module reduces the fixed record of other-deduction line items (loan
//! amortizations, dues, produce purchases, utility bills) to a single total.
//! Plain addition: associative and commutative, with no ordering dependency
//! between lines.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, DeductionLines};

use super::validate::non_negative;

/// The result of the other-deduction aggregation, including the audit step.
#[derive(Debug, Clone)]
pub struct OtherDeductionsResult {
    /// The sum of all line items.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the fixed other-deduction line items.
///
/// Every field of [`DeductionLines`] participates; absent lines are zero.
///
/// # Arguments
///
/// * `lines` - The deduction line record
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns an `OtherDeductionsResult` containing the total and an audit
/// step, or `InvalidAmount` if any line is negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_other_deductions_total;
/// use netpay_engine::models::DeductionLines;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut lines = DeductionLines::default();
/// lines.water_bill = Decimal::from_str("350.75").unwrap();
/// lines.mpl = Decimal::from_str("1500").unwrap();
///
/// let result = calculate_other_deductions_total(&lines, 1).unwrap();
/// assert_eq!(result.total, Decimal::from_str("1850.75").unwrap());
/// ```
pub fn calculate_other_deductions_total(
    lines: &DeductionLines,
    step_number: u32,
) -> EngineResult<OtherDeductionsResult> {
    let mut total = Decimal::ZERO;
    let mut nonzero = serde_json::Map::new();

    for (name, amount) in lines.line_items() {
        let amount = non_negative(name, amount)?;
        total += amount;
        if amount != Decimal::ZERO {
            nonzero.insert(
                name.to_string(),
                serde_json::Value::String(amount.normalize().to_string()),
            );
        }
    }

    let line_count = nonzero.len();
    let audit_step = AuditStep {
        step_number,
        rule_id: "other_deductions".to_string(),
        rule_name: "Other Deduction Line Items".to_string(),
        reference: "authorized payroll deductions".to_string(),
        input: serde_json::Value::Object(nonzero),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Sum of {} non-zero line item(s) = {}",
            line_count,
            total.normalize()
        ),
    };

    Ok(OtherDeductionsResult { total, audit_step })
}
