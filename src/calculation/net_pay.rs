//! Net pay orchestration.
//!
//! This module combines the component calculations into the single
//! authoritative net pay formula. Both the library surface and the HTTP API
//! call this one function; there is no second copy of the formula anywhere.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, CalculatorInput, NetPayCalculation, NetPayResult};

use super::contribution_total::calculate_contribution_total;
use super::gsis_loans::calculate_gsis_loans_total;
use super::hes_subsidy::calculate_hes_subsidy;
use super::monthly_basic::{MONTHS_PER_YEAR, calculate_monthly_basic};
use super::other_deductions::calculate_other_deductions_total;
use super::withholding_tax::calculate_withholding_tax;

/// Calculates net pay from a complete calculator input.
///
/// The formula:
///
/// ```text
/// monthly_basic      = annual_salary / 12
/// tax_deduction      = monthly_basic * tax_rate_percent / 100
/// contribution_total = sss + philhealth + pagibig
/// gsis_loans_total   = sum of the six GSIS loans
/// other_total        = sum of the fixed deduction line items
/// hes.net            = 80% of the HES allowance total
/// total_deductions   = tax_deduction + contribution_total
///                    + gsis_loans_total + other_total
/// monthly_net_pay    = monthly_basic - total_deductions + hes.net
/// annual_net_pay     = monthly_net_pay * 12
/// ```
///
/// The other-deduction total enters `total_deductions` exactly once.
///
/// # Arguments
///
/// * `input` - The complete calculator input
///
/// # Returns
///
/// Returns a [`NetPayCalculation`] with every component amount and a full
/// audit trace, or the first validation error encountered
/// (`InvalidAmount` for negative inputs, `InvalidTaxRate` for a rate
/// outside 0 to 50).
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_net_pay;
/// use netpay_engine::models::{CalculatorInput, ContributionSet, SalaryBasis};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculatorInput {
///     salary: SalaryBasis::new(Decimal::from_str("420000").unwrap()),
///     tax_rate_percent: Decimal::from_str("20").unwrap(),
///     contributions: ContributionSet {
///         sss: Decimal::from_str("1375").unwrap(),
///         philhealth: Decimal::from_str("900").unwrap(),
///         pagibig: Decimal::from_str("100").unwrap(),
///     },
///     ..CalculatorInput::default()
/// };
///
/// let result = calculate_net_pay(&input).unwrap();
/// assert_eq!(result.totals.monthly_net_pay, Decimal::from_str("25625").unwrap());
/// assert_eq!(result.totals.annual_net_pay, Decimal::from_str("307500").unwrap());
/// ```
pub fn calculate_net_pay(input: &CalculatorInput) -> EngineResult<NetPayCalculation> {
    let start_time = Instant::now();
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let monthly_basic_result = calculate_monthly_basic(&input.salary, step_number)?;
    let monthly_basic = monthly_basic_result.monthly_basic;
    audit_steps.push(monthly_basic_result.audit_step);
    step_number += 1;

    let tax_result =
        calculate_withholding_tax(monthly_basic, input.tax_rate_percent, step_number)?;
    let tax_deduction = tax_result.tax_deduction;
    audit_steps.push(tax_result.audit_step);
    step_number += 1;

    let contribution_result = calculate_contribution_total(&input.contributions, step_number)?;
    let contribution_total = contribution_result.total;
    audit_steps.push(contribution_result.audit_step);
    step_number += 1;

    let gsis_result = calculate_gsis_loans_total(&input.gsis_loans, step_number)?;
    let gsis_loans_total = gsis_result.total;
    audit_steps.push(gsis_result.audit_step);
    step_number += 1;

    let other_result = calculate_other_deductions_total(&input.other_deductions, step_number)?;
    let total_other_deductions = other_result.total;
    audit_steps.push(other_result.audit_step);
    step_number += 1;

    let hes_result = calculate_hes_subsidy(&input.hes, step_number)?;
    let hes = hes_result.subsidy;
    audit_steps.push(hes_result.audit_step);
    step_number += 1;

    // The line-item total is added exactly once
    let total_deductions =
        tax_deduction + contribution_total + gsis_loans_total + total_other_deductions;
    let monthly_net_pay = monthly_basic - total_deductions + hes.net;
    let annual_net_pay = monthly_net_pay * Decimal::from(MONTHS_PER_YEAR);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay_totals".to_string(),
        rule_name: "Net Pay Totals".to_string(),
        reference: "campus payroll computation".to_string(),
        input: serde_json::json!({
            "monthly_basic": monthly_basic.normalize().to_string(),
            "tax_deduction": tax_deduction.normalize().to_string(),
            "contribution_total": contribution_total.normalize().to_string(),
            "gsis_loans_total": gsis_loans_total.normalize().to_string(),
            "other_deductions_total": total_other_deductions.normalize().to_string(),
            "net_hes": hes.net.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string(),
            "monthly_net_pay": monthly_net_pay.normalize().to_string(),
            "annual_net_pay": annual_net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} + {} = {}",
            monthly_basic.normalize(),
            total_deductions.normalize(),
            hes.net.normalize(),
            monthly_net_pay.normalize()
        ),
    });

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(NetPayCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        monthly_basic,
        tax_deduction,
        contribution_total,
        gsis_loans_total,
        hes,
        totals: NetPayResult {
            monthly_net_pay,
            annual_net_pay,
            total_deductions,
            total_other_deductions,
            net_hes_amount: hes.net,
        },
        audit_trace: AuditTrace {
            steps: audit_steps,
            duration_us,
        },
    })
}
