//! Mandated contribution aggregation.
//!
//! This module sums the three mandated monthly contributions: SSS,
//! PhilHealth, and Pag-IBIG. Each amount is independently settable; defaults
//! come from the effective-dated contribution tables in configuration.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, ContributionSet};

use super::validate::non_negative;

/// The result of the contribution aggregation, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionTotalResult {
    /// The sum of the mandated contributions.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the mandated monthly contributions.
///
/// # Arguments
///
/// * `contributions` - The SSS, PhilHealth, and Pag-IBIG amounts
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `ContributionTotalResult` containing the total and an audit
/// step, or `InvalidAmount` if any amount is negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_contribution_total;
/// use netpay_engine::models::ContributionSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let contributions = ContributionSet {
///     sss: Decimal::from_str("1375").unwrap(),
///     philhealth: Decimal::from_str("900").unwrap(),
///     pagibig: Decimal::from_str("100").unwrap(),
/// };
///
/// let result = calculate_contribution_total(&contributions, 1).unwrap();
/// assert_eq!(result.total, Decimal::from_str("2375").unwrap());
/// ```
pub fn calculate_contribution_total(
    contributions: &ContributionSet,
    step_number: u32,
) -> EngineResult<ContributionTotalResult> {
    let sss = non_negative("sss", contributions.sss)?;
    let philhealth = non_negative("philhealth", contributions.philhealth)?;
    let pagibig = non_negative("pagibig", contributions.pagibig)?;

    let total = sss + philhealth + pagibig;

    let audit_step = AuditStep {
        step_number,
        rule_id: "mandated_contributions".to_string(),
        rule_name: "Mandated Contributions".to_string(),
        reference: "RA 11199 / RA 11223 / RA 9679".to_string(),
        input: serde_json::json!({
            "sss": sss.normalize().to_string(),
            "philhealth": philhealth.normalize().to_string(),
            "pagibig": pagibig.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} + {} = {}",
            sss.normalize(),
            philhealth.normalize(),
            pagibig.normalize(),
            total.normalize()
        ),
    };

    Ok(ContributionTotalResult { total, audit_step })
}
