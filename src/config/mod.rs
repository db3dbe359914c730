//! Configuration for the Net Pay Calculation Engine.
//!
//! Contribution defaults, the deduction rule set, and withholding parameters
//! are loaded from YAML files rather than hard-coded, so bracket and
//! contribution updates ship as data.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BasicPayWithholding, ContributionDefaults, ContributionTable, DeductionCategory,
    DeductionRule, DeductionRulesConfig, HesWithholding, PayrollConfig, PolicyMetadata,
    TaxBracket, WithholdingConfig,
};
