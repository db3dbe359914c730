//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! deduction policy from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionDefaults, ContributionTable, DeductionRule, DeductionRulesConfig, PayrollConfig,
    PolicyMetadata, WithholdingConfig,
};

/// Loads and provides access to the payroll deduction policy.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query deduction rules, contribution defaults,
/// and withholding parameters.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ph_payroll/
/// ├── policy.yaml       # Policy metadata
/// ├── rules.yaml        # The fixed deduction-line rule set
/// ├── withholding.yaml  # Tax-rate bounds, HES rate, bracket table
/// └── rates/
///     └── 2024-01-01.yaml  # Contribution defaults effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use netpay_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ph_payroll").unwrap();
///
/// // Get a deduction rule
/// let rule = loader.deduction_rule("water_bill").unwrap();
/// println!("Rule: {}", rule.name);
///
/// // Get the contribution defaults for a date
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let defaults = loader.contribution_defaults(date).unwrap();
/// println!("SSS default: {}", defaults.sss);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/ph_payroll")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use netpay_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/ph_payroll")?;
    /// # Ok::<(), netpay_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load policy.yaml
        let policy_path = path.join("policy.yaml");
        let metadata = Self::load_yaml::<PolicyMetadata>(&policy_path)?;

        // Load rules.yaml
        let rules_path = path.join("rules.yaml");
        let rules_config = Self::load_yaml::<DeductionRulesConfig>(&rules_path)?;

        // Load withholding.yaml
        let withholding_path = path.join("withholding.yaml");
        let withholding = Self::load_yaml::<WithholdingConfig>(&withholding_path)?;

        // Load all contribution tables from the rates directory
        let rates_dir = path.join("rates");
        let tables = Self::load_tables(&rates_dir)?;

        let config = PayrollConfig::new(metadata, rules_config.rules, tables, withholding);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all contribution tables from the rates directory.
    fn load_tables(rates_dir: &Path) -> EngineResult<Vec<ContributionTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<ContributionTable>(&path)?;
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the policy metadata.
    pub fn policy(&self) -> &PolicyMetadata {
        self.config.policy()
    }

    /// Gets a deduction rule by its id.
    ///
    /// # Arguments
    ///
    /// * `name` - The rule id (e.g., "water_bill")
    ///
    /// # Returns
    ///
    /// Returns the rule if found, or `DeductionRuleNotFound` error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use netpay_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/ph_payroll")?;
    /// let rule = loader.deduction_rule("water_bill")?;
    /// println!("Rule: {}", rule.name);
    /// # Ok::<(), netpay_engine::error::EngineError>(())
    /// ```
    pub fn deduction_rule(&self, name: &str) -> EngineResult<&DeductionRule> {
        self.config
            .rules()
            .get(name)
            .ok_or_else(|| EngineError::DeductionRuleNotFound {
                name: name.to_string(),
            })
    }

    /// Returns all deduction rules.
    pub fn deduction_rules(&self) -> &std::collections::HashMap<String, DeductionRule> {
        self.config.rules()
    }

    /// Gets the contribution defaults effective on a given date.
    ///
    /// The method finds the most recent contribution table that is effective
    /// on or before the given date.
    ///
    /// # Arguments
    ///
    /// * `date` - The date for which to get the defaults
    ///
    /// # Returns
    ///
    /// Returns the contribution defaults if found, or `RateNotFound` if no
    /// table is effective for the given date.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use netpay_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/ph_payroll")?;
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let defaults = loader.contribution_defaults(date)?;
    /// println!("PhilHealth default: {}", defaults.philhealth);
    /// # Ok::<(), netpay_engine::error::EngineError>(())
    /// ```
    pub fn contribution_defaults(&self, date: NaiveDate) -> EngineResult<&ContributionDefaults> {
        self.config
            .tables()
            .iter()
            .rev()
            .find(|t| t.effective_date <= date)
            .map(|t| &t.contributions)
            .ok_or(EngineError::RateNotFound { date })
    }

    /// Returns the withholding configuration.
    pub fn withholding(&self) -> &WithholdingConfig {
        self.config.withholding()
    }

    /// Returns the basic-pay withholding rate applied when a request does not
    /// supply one, in percent.
    pub fn default_tax_rate(&self) -> Decimal {
        self.config.withholding().basic_pay.default_rate_percent
    }
}
