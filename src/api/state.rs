//! Application state for the Net Pay Calculation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Contains the loaded payroll configuration plus the mutable default
/// amounts of the deduction rules, which `PUT /deductions/rules/:id` can
/// change at runtime.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// Current default amount per deduction rule id.
    rule_amounts: Arc<RwLock<HashMap<String, Decimal>>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    ///
    /// Rule default amounts start from the configured `default_amount` of
    /// each rule.
    pub fn new(config: ConfigLoader) -> Self {
        let rule_amounts = config
            .deduction_rules()
            .iter()
            .map(|(id, rule)| (id.clone(), rule.default_amount))
            .collect();

        Self {
            config: Arc::new(config),
            rule_amounts: Arc::new(RwLock::new(rule_amounts)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a snapshot of the current rule default amounts.
    pub fn rule_amounts(&self) -> HashMap<String, Decimal> {
        self.rule_amounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the current default amount for one rule.
    pub fn rule_amount(&self, id: &str) -> EngineResult<Decimal> {
        self.rule_amounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::DeductionRuleNotFound {
                name: id.to_string(),
            })
    }

    /// Updates the default amount for one rule.
    ///
    /// # Errors
    ///
    /// Returns `DeductionRuleNotFound` for an unknown rule id and
    /// `InvalidAmount` for a negative amount.
    pub fn set_rule_amount(&self, id: &str, amount: Decimal) -> EngineResult<Decimal> {
        if amount < Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                field: id.to_string(),
                message: format!("amount {} cannot be negative", amount),
            });
        }

        let mut amounts = self
            .rule_amounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match amounts.get_mut(id) {
            Some(current) => {
                *current = amount;
                Ok(amount)
            }
            None => Err(EngineError::DeductionRuleNotFound {
                name: id.to_string(),
            }),
        }
    }
}
