//! Pay period model.
//!
//! A pay period identifies the calendar month a calculation applies to and
//! drives the effective-date lookup of the contribution tables.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar-month pay period, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

impl PayPeriod {
    /// Creates a pay period, returning an error for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPayPeriod {
                value: format!("{:04}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the first day of the pay period month.
    ///
    /// Used as the effective date when selecting a contribution table.
    ///
    /// # Examples
    ///
    /// ```
    /// use netpay_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period: PayPeriod = "2024-06".parse().unwrap();
    /// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    /// ```
    pub fn first_day(&self) -> NaiveDate {
        // new() guarantees the month is valid
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| unreachable!("pay period holds a valid month"))
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidPayPeriod {
            value: s.to_string(),
        };

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pay_period() {
        let period: PayPeriod = "2024-06".parse().unwrap();
        assert_eq!(period.year, 2024);
        assert_eq!(period.month, 6);
    }

    #[test]
    fn test_parse_december() {
        let period: PayPeriod = "2023-12".parse().unwrap();
        assert_eq!(period.month, 12);
    }

    #[test]
    fn test_parse_rejects_month_zero() {
        let result: Result<PayPeriod, _> = "2024-00".parse();
        assert!(matches!(
            result,
            Err(EngineError::InvalidPayPeriod { value }) if value == "2024-00"
        ));
    }

    #[test]
    fn test_parse_rejects_month_thirteen() {
        let result: Result<PayPeriod, _> = "2024-13".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_free_text() {
        let result: Result<PayPeriod, _> = "June 2024".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_short_year() {
        let result: Result<PayPeriod, _> = "24-06".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let result: Result<PayPeriod, _> = "202406".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_first_day() {
        let period: PayPeriod = "2024-06".parse().unwrap();
        assert_eq!(
            period.first_day(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_display_round_trip() {
        let period: PayPeriod = "2024-06".parse().unwrap();
        assert_eq!(period.to_string(), "2024-06");
    }

    #[test]
    fn test_serde_round_trip() {
        let period: PayPeriod = "2024-06".parse().unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2024-06\"");

        let parsed: PayPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<PayPeriod, _> = serde_json::from_str("\"2024-99\"");
        assert!(result.is_err());
    }
}
