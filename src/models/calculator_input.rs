//! Input models for the net pay calculation.
//!
//! These are plain value records: the calculator is a pure function of one
//! [`CalculatorInput`], with no state carried between calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeductionLines;

/// The salary basis for a calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryBasis {
    /// The annual salary. Must be non-negative.
    pub annual_salary: Decimal,
}

impl SalaryBasis {
    /// Creates a salary basis from an annual salary.
    pub fn new(annual_salary: Decimal) -> Self {
        Self { annual_salary }
    }

    /// Creates a salary basis from a monthly basic pay.
    ///
    /// Annualizing the wire-level monthly figure keeps the later division by
    /// twelve exact.
    ///
    /// # Examples
    ///
    /// ```
    /// use netpay_engine::models::SalaryBasis;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let basis = SalaryBasis::from_monthly(Decimal::from_str("35000").unwrap());
    /// assert_eq!(basis.annual_salary, Decimal::from_str("420000").unwrap());
    /// ```
    pub fn from_monthly(monthly_basic: Decimal) -> Self {
        Self {
            annual_salary: monthly_basic * Decimal::from(12),
        }
    }
}

/// The mandated monthly contribution amounts.
///
/// Each amount is independently overridable; defaults come from the
/// effective-dated contribution tables in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionSet {
    /// Monthly SSS contribution.
    #[serde(default)]
    pub sss: Decimal,
    /// Monthly PhilHealth premium.
    #[serde(default)]
    pub philhealth: Decimal,
    /// Monthly Pag-IBIG contribution.
    #[serde(default)]
    pub pagibig: Decimal,
}

/// The GSIS loan amortizations collected through payroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GsisLoans {
    /// Consolidated loan amortization.
    #[serde(default)]
    pub conso: Decimal,
    /// Emergency loan amortization.
    #[serde(default)]
    pub emergency: Decimal,
    /// Policy loan amortization.
    #[serde(default)]
    pub policy_loan: Decimal,
    /// Optional life insurance loan amortization.
    #[serde(default)]
    pub optional: Decimal,
    /// GSIS multi-purpose loan amortization.
    #[serde(default)]
    pub mpl: Decimal,
    /// GSIS MPL Live amortization.
    #[serde(default)]
    pub mpl_live: Decimal,
}

impl GsisLoans {
    /// Returns every loan as a `(name, amount)` pair, in declaration order.
    pub fn line_items(&self) -> [(&'static str, Decimal); 6] {
        [
            ("conso", self.conso),
            ("emergency", self.emergency),
            ("policy_loan", self.policy_loan),
            ("optional", self.optional),
            ("mpl", self.mpl),
            ("mpl_live", self.mpl_live),
        ]
    }
}

/// The Higher Education Subsidy allowance line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HesAllowances {
    /// The base HES allowance.
    #[serde(default)]
    pub hes_allowance: Decimal,
    /// Research incentive.
    #[serde(default)]
    pub research_incentive: Decimal,
    /// Academic excellence incentive.
    #[serde(default)]
    pub academic_excellence: Decimal,
}

/// The complete input to the net pay calculation.
///
/// One immutable input record in, one result record out; the calculation is
/// deterministic and keeps no cross-call state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    /// The salary basis.
    pub salary: SalaryBasis,
    /// The basic-pay withholding tax rate, in percent (0 to 50).
    pub tax_rate_percent: Decimal,
    /// The mandated contribution amounts.
    #[serde(default)]
    pub contributions: ContributionSet,
    /// GSIS loan amortizations.
    #[serde(default)]
    pub gsis_loans: GsisLoans,
    /// The fixed other-deduction line items.
    #[serde(default)]
    pub other_deductions: DeductionLines,
    /// HES allowance line items.
    #[serde(default)]
    pub hes: HesAllowances,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_salary_basis_from_monthly() {
        let basis = SalaryBasis::from_monthly(dec("35000"));
        assert_eq!(basis.annual_salary, dec("420000"));
    }

    #[test]
    fn test_salary_basis_from_monthly_keeps_centavos() {
        let basis = SalaryBasis::from_monthly(dec("35000.50"));
        assert_eq!(basis.annual_salary, dec("420006.00"));
    }

    #[test]
    fn test_gsis_loans_line_items_order() {
        let loans = GsisLoans {
            conso: dec("1"),
            emergency: dec("2"),
            policy_loan: dec("3"),
            optional: dec("4"),
            mpl: dec("5"),
            mpl_live: dec("6"),
        };

        let names: Vec<&str> = loans.line_items().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["conso", "emergency", "policy_loan", "optional", "mpl", "mpl_live"]
        );
    }

    #[test]
    fn test_deserialize_contributions_with_defaults() {
        let json = r#"{ "sss": "1375" }"#;
        let contributions: ContributionSet = serde_json::from_str(json).unwrap();

        assert_eq!(contributions.sss, dec("1375"));
        assert_eq!(contributions.philhealth, Decimal::ZERO);
        assert_eq!(contributions.pagibig, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_calculator_input_minimal() {
        let json = r#"{
            "salary": { "annual_salary": "420000" },
            "tax_rate_percent": "20"
        }"#;

        let input: CalculatorInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.salary.annual_salary, dec("420000"));
        assert_eq!(input.tax_rate_percent, dec("20"));
        assert_eq!(input.contributions, ContributionSet::default());
        assert_eq!(input.gsis_loans, GsisLoans::default());
        assert_eq!(input.other_deductions, DeductionLines::default());
        assert_eq!(input.hes, HesAllowances::default());
    }

    #[test]
    fn test_calculator_input_serde_round_trip() {
        let input = CalculatorInput {
            salary: SalaryBasis::new(dec("420000")),
            tax_rate_percent: dec("20"),
            contributions: ContributionSet {
                sss: dec("1375"),
                philhealth: dec("900"),
                pagibig: dec("100"),
            },
            gsis_loans: GsisLoans {
                conso: dec("2500"),
                ..GsisLoans::default()
            },
            other_deductions: DeductionLines::default(),
            hes: HesAllowances {
                hes_allowance: dec("5000"),
                research_incentive: dec("1000"),
                academic_excellence: dec("500"),
            },
        };

        let json = serde_json::to_string(&input).unwrap();
        let parsed: CalculatorInput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, input);
    }
}
