//! Configuration types for the payroll deduction policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata about the payroll deduction policy.
///
/// Contains identifying information about the policy, including its
/// code, name, version, and source URL.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// The policy code (e.g., "PH-CAMPUS-PAYROLL").
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
    /// URL to the policy documentation.
    pub source_url: String,
}

/// The category of a deduction line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// Prior-period adjustments (tax refund, PhilHealth adjustment, disallowance).
    Adjustment,
    /// Loan amortizations collected through payroll.
    Loan,
    /// Voluntary savings or contribution programs.
    Contribution,
    /// Association and cooperative dues.
    Dues,
    /// Campus produce purchases charged against salary.
    Produce,
    /// Utility bills charged against salary.
    Utility,
}

/// A single deduction rule in the fixed line-item set.
///
/// Each rule corresponds to one named field of the deduction line record;
/// the rule set is a fixed catalogue, not a dynamic list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRule {
    /// The human-readable name of the deduction.
    pub name: String,
    /// The category of the deduction.
    pub category: DeductionCategory,
    /// A description of the deduction.
    pub description: String,
    /// The default amount applied when a request omits this line.
    #[serde(default)]
    pub default_amount: Decimal,
}

/// Deduction rules configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionRulesConfig {
    /// Map of rule id to rule details.
    pub rules: HashMap<String, DeductionRule>,
}

/// Default monthly amounts for the mandated contributions.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionDefaults {
    /// Default monthly SSS contribution.
    pub sss: Decimal,
    /// Default monthly PhilHealth premium.
    pub philhealth: Decimal,
    /// Default monthly Pag-IBIG contribution.
    pub pagibig: Decimal,
}

/// Contribution defaults for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionTable {
    /// The effective date for these defaults.
    pub effective_date: NaiveDate,
    /// The default contribution amounts.
    pub contributions: ContributionDefaults,
}

/// Bounds and default for the adjustable basic-pay withholding tax rate.
#[derive(Debug, Clone, Deserialize)]
pub struct BasicPayWithholding {
    /// The minimum allowed rate, in percent.
    pub min_rate_percent: Decimal,
    /// The maximum allowed rate, in percent.
    pub max_rate_percent: Decimal,
    /// The rate applied when a request does not supply one, in percent.
    pub default_rate_percent: Decimal,
}

/// The fixed withholding applied to the Higher Education Subsidy.
#[derive(Debug, Clone, Deserialize)]
pub struct HesWithholding {
    /// The withholding rate as a fraction (e.g., 0.20 for 20%).
    pub withholding_rate: Decimal,
}

/// One row of the informational monthly tax bracket table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The lower bound of the bracket (inclusive).
    pub lower: Decimal,
    /// The upper bound of the bracket (exclusive); open-ended when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Decimal>,
    /// The marginal rate for the bracket, in percent.
    pub rate_percent: Decimal,
}

/// Withholding configuration from withholding.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingConfig {
    /// Basic-pay withholding rate bounds and default.
    pub basic_pay: BasicPayWithholding,
    /// HES withholding parameters.
    pub hes: HesWithholding,
    /// Informational monthly tax bracket table.
    pub brackets: Vec<TaxBracket>,
}

/// The complete payroll configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a policy configuration directory.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Policy metadata.
    metadata: PolicyMetadata,
    /// The fixed deduction rule set.
    rules: HashMap<String, DeductionRule>,
    /// Contribution tables by effective date (sorted oldest first).
    tables: Vec<ContributionTable>,
    /// Withholding configuration.
    withholding: WithholdingConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: PolicyMetadata,
        rules: HashMap<String, DeductionRule>,
        tables: Vec<ContributionTable>,
        withholding: WithholdingConfig,
    ) -> Self {
        let mut sorted_tables = tables;
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rules,
            tables: sorted_tables,
            withholding,
        }
    }

    /// Returns the policy metadata.
    pub fn policy(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns all deduction rules.
    pub fn rules(&self) -> &HashMap<String, DeductionRule> {
        &self.rules
    }

    /// Returns the withholding configuration.
    pub fn withholding(&self) -> &WithholdingConfig {
        &self.withholding
    }

    /// Returns all contribution tables.
    pub fn tables(&self) -> &[ContributionTable] {
        &self.tables
    }
}
