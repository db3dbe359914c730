//! Error types for the Net Pay Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a payroll calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Net Pay Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use netpay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No contribution table is effective on or before the given date.
    #[error("No contribution table effective on date {date}")]
    RateNotFound {
        /// The date for which a contribution table was requested.
        date: NaiveDate,
    },

    /// A deduction rule name was not found in the configured rule set.
    #[error("Deduction rule not found: {name}")]
    DeductionRuleNotFound {
        /// The rule name that was not found.
        name: String,
    },

    /// A pay period string could not be parsed.
    #[error("Invalid pay period '{value}': expected YYYY-MM")]
    InvalidPayPeriod {
        /// The value that failed to parse.
        value: String,
    },

    /// The basic-pay withholding tax rate was outside the allowed range.
    #[error("Invalid tax rate {rate}%: must be between 0 and 50")]
    InvalidTaxRate {
        /// The rejected rate, in percent.
        rate: Decimal,
    },

    /// A monetary input was invalid (negative amounts are rejected).
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field that was invalid.
        field: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_rate_not_found_displays_date() {
        let error = EngineError::RateNotFound {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No contribution table effective on date 2020-01-01"
        );
    }

    #[test]
    fn test_deduction_rule_not_found_displays_name() {
        let error = EngineError::DeductionRuleNotFound {
            name: "tithes".to_string(),
        };
        assert_eq!(error.to_string(), "Deduction rule not found: tithes");
    }

    #[test]
    fn test_invalid_pay_period_displays_value() {
        let error = EngineError::InvalidPayPeriod {
            value: "June 2024".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay period 'June 2024': expected YYYY-MM"
        );
    }

    #[test]
    fn test_invalid_tax_rate_displays_rate() {
        let error = EngineError::InvalidTaxRate {
            rate: Decimal::from_str("75").unwrap(),
        };
        assert_eq!(error.to_string(), "Invalid tax rate 75%: must be between 0 and 50");
    }

    #[test]
    fn test_invalid_amount_displays_field_and_message() {
        let error = EngineError::InvalidAmount {
            field: "water_bill".to_string(),
            message: "amount cannot be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid amount for 'water_bill': amount cannot be negative"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative monthly basic pay".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: negative monthly basic pay"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
