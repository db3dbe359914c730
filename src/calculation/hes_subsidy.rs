//! Higher Education Subsidy calculation.
//!
//! This module aggregates the HES allowance line items and applies the fixed
//! HES withholding rate. The rate is a separate policy from the adjustable
//! basic-pay withholding rate and stays fixed at 20%.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, HesAllowances, HesSubsidy};

use super::validate::non_negative;

/// The statutory reference for the HES withholding.
pub const HES_REFERENCE: &str = "RA 10931 (UniFAST)";

/// Returns the fixed HES withholding rate.
///
/// The rate is 0.20 (20% of the HES total).
pub fn hes_withholding_rate() -> Decimal {
    Decimal::new(20, 2)
}

/// The result of the HES calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HesSubsidyResult {
    /// The HES breakdown: total, withholding, and net.
    pub subsidy: HesSubsidy,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the Higher Education Subsidy breakdown.
///
/// The three allowance line items are summed, the fixed 20% withholding is
/// taken from the total, and the remainder is the net subsidy added back to
/// the employee's pay.
///
/// # Arguments
///
/// * `allowances` - The HES allowance line items
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `HesSubsidyResult` containing the breakdown and an audit step,
/// or `InvalidAmount` if any line is negative.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_hes_subsidy;
/// use netpay_engine::models::HesAllowances;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let allowances = HesAllowances {
///     hes_allowance: Decimal::from_str("5000").unwrap(),
///     research_incentive: Decimal::from_str("1000").unwrap(),
///     academic_excellence: Decimal::from_str("500").unwrap(),
/// };
///
/// let result = calculate_hes_subsidy(&allowances, 1).unwrap();
/// assert_eq!(result.subsidy.total, Decimal::from_str("6500").unwrap());
/// assert_eq!(result.subsidy.withholding_tax, Decimal::from_str("1300").unwrap());
/// assert_eq!(result.subsidy.net, Decimal::from_str("5200").unwrap());
/// ```
pub fn calculate_hes_subsidy(
    allowances: &HesAllowances,
    step_number: u32,
) -> EngineResult<HesSubsidyResult> {
    let hes_allowance = non_negative("hes_allowance", allowances.hes_allowance)?;
    let research_incentive = non_negative("research_incentive", allowances.research_incentive)?;
    let academic_excellence = non_negative("academic_excellence", allowances.academic_excellence)?;

    let total = hes_allowance + research_incentive + academic_excellence;
    let withholding_tax = total * hes_withholding_rate();
    let net = total - withholding_tax;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hes_subsidy".to_string(),
        rule_name: "Higher Education Subsidy".to_string(),
        reference: HES_REFERENCE.to_string(),
        input: serde_json::json!({
            "hes_allowance": hes_allowance.normalize().to_string(),
            "research_incentive": research_incentive.normalize().to_string(),
            "academic_excellence": academic_excellence.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
            "withholding_rate": hes_withholding_rate().normalize().to_string(),
            "withholding_tax": withholding_tax.normalize().to_string(),
            "net": net.normalize().to_string()
        }),
        reasoning: format!(
            "{} - ({} x {}) = {}",
            total.normalize(),
            total.normalize(),
            hes_withholding_rate().normalize(),
            net.normalize()
        ),
    };

    Ok(HesSubsidyResult {
        subsidy: HesSubsidy {
            total,
            withholding_tax,
            net,
        },
        audit_step,
    })
}
