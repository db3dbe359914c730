//! Calculation result models for the Net Pay Calculation Engine.
//!
//! This module contains the [`NetPayCalculation`] type and its associated
//! structures that capture all outputs from a net pay calculation, including
//! the per-component amounts, result totals, and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The Higher Education Subsidy breakdown.
///
/// # Example
///
/// ```
/// use netpay_engine::models::HesSubsidy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hes = HesSubsidy {
///     total: Decimal::from_str("6500").unwrap(),
///     withholding_tax: Decimal::from_str("1300").unwrap(),
///     net: Decimal::from_str("5200").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HesSubsidy {
    /// The sum of the HES allowance line items.
    pub total: Decimal,
    /// The fixed-rate withholding on the total.
    pub withholding_tax: Decimal,
    /// The net subsidy paid out (total minus withholding).
    pub net: Decimal,
}

/// The result totals of a net pay calculation.
///
/// Computed, never stored: the calculation is repeated from its inputs
/// whenever anything changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetPayResult {
    /// Net pay for one month.
    pub monthly_net_pay: Decimal,
    /// Net pay annualized (monthly net times twelve).
    pub annual_net_pay: Decimal,
    /// Every deduction applied against the monthly basic pay.
    pub total_deductions: Decimal,
    /// The portion of `total_deductions` from the other-deduction line items.
    pub total_other_deductions: Decimal,
    /// The net HES amount added back after deductions.
    pub net_hes_amount: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statutory or policy reference for this rule.
    pub reference: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
///
/// Records every component of the computation for transparency, so a payroll
/// officer can reconcile the result line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a net pay calculation.
///
/// Captures the result totals together with every intermediate amount and a
/// full audit trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetPayCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Monthly basic pay (annual salary over twelve).
    pub monthly_basic: Decimal,
    /// Withholding tax on the monthly basic pay.
    pub tax_deduction: Decimal,
    /// Sum of the mandated contributions.
    pub contribution_total: Decimal,
    /// Sum of the GSIS loan amortizations.
    pub gsis_loans_total: Decimal,
    /// The HES breakdown.
    pub hes: HesSubsidy,
    /// The result totals.
    pub totals: NetPayResult,
    /// Complete audit trace of calculation steps.
    pub audit_trace: AuditTrace,
}
