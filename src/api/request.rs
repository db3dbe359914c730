//! Request types for the Net Pay Calculation Engine API.
//!
//! This module defines the JSON request structures for the
//! `/deductions/calculate` and `/deductions/rules/:id` endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ContributionDefaults;
use crate::error::EngineResult;
use crate::models::{
    CalculatorInput, ContributionSet, DeductionLines, GsisLoans, HesAllowances, PayPeriod,
    SalaryBasis,
};

/// Request body for the `/deductions/calculate` endpoint.
///
/// Only the employee id, monthly basic pay, and pay period are required;
/// everything else falls back to configured defaults or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Identifier of the employee the calculation is for.
    pub employee_id: String,
    /// The monthly basic pay.
    pub basic_pay: Decimal,
    /// The pay period, written as `YYYY-MM`.
    pub pay_period: PayPeriod,
    /// Optional basic-pay withholding rate override, in percent.
    #[serde(default)]
    pub tax_rate_percent: Option<Decimal>,
    /// Optional per-contribution overrides.
    #[serde(default)]
    pub contributions: ContributionOverrides,
    /// GSIS loan amortizations.
    #[serde(default)]
    pub gsis_loans: GsisLoans,
    /// Additional deduction line items, named by rule id.
    #[serde(default)]
    pub additional_deductions: Vec<DeductionEntry>,
    /// HES allowance line items.
    #[serde(default)]
    pub hes: HesAllowances,
}

/// Per-contribution overrides in a calculation request.
///
/// An absent field means "use the configured default for the pay period";
/// a present field overrides it, including an explicit zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContributionOverrides {
    /// Override for the monthly SSS contribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sss: Option<Decimal>,
    /// Override for the monthly PhilHealth premium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub philhealth: Option<Decimal>,
    /// Override for the monthly Pag-IBIG contribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagibig: Option<Decimal>,
}

impl ContributionOverrides {
    /// Resolves the overrides against the configured defaults.
    pub fn resolve(&self, defaults: &ContributionDefaults) -> ContributionSet {
        ContributionSet {
            sss: self.sss.unwrap_or(defaults.sss),
            philhealth: self.philhealth.unwrap_or(defaults.philhealth),
            pagibig: self.pagibig.unwrap_or(defaults.pagibig),
        }
    }
}

/// A named deduction line amount, used in requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionEntry {
    /// The deduction rule id (e.g., "water_bill").
    pub name: String,
    /// The deduction amount.
    pub amount: Decimal,
}

/// Request body for the `PUT /deductions/rules/:id` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRuleRequest {
    /// The new default amount for the rule.
    pub default_amount: Decimal,
}

impl CalculationRequest {
    /// Builds the calculator input from this request and resolved defaults.
    ///
    /// Rule default amounts seed the line-item record first; the request's
    /// `additional_deductions` then overwrite individual lines by rule id.
    ///
    /// # Errors
    ///
    /// Returns `DeductionRuleNotFound` when an additional deduction names an
    /// id outside the fixed line-item set.
    pub fn build_calculator_input(
        &self,
        defaults: &ContributionDefaults,
        default_tax_rate: Decimal,
        rule_amounts: &HashMap<String, Decimal>,
    ) -> EngineResult<CalculatorInput> {
        let mut other_deductions = DeductionLines::default();
        for (id, amount) in rule_amounts {
            if *amount != Decimal::ZERO {
                other_deductions.set_line(id, *amount)?;
            }
        }
        for entry in &self.additional_deductions {
            other_deductions.set_line(&entry.name, entry.amount)?;
        }

        Ok(CalculatorInput {
            salary: SalaryBasis::from_monthly(self.basic_pay),
            tax_rate_percent: self.tax_rate_percent.unwrap_or(default_tax_rate),
            contributions: self.contributions.resolve(defaults),
            gsis_loans: self.gsis_loans,
            other_deductions,
            hes: self.hes,
        })
    }
}
