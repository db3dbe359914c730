//! Basic-pay withholding tax calculation.
//!
//! This module applies the adjustable flat withholding rate to the monthly
//! basic pay. The rate is distinct from the fixed HES withholding rate; the
//! two are separate policies and are never unified.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The lowest allowed basic-pay withholding rate, in percent.
pub const MIN_TAX_RATE_PERCENT: u32 = 0;

/// The highest allowed basic-pay withholding rate, in percent.
pub const MAX_TAX_RATE_PERCENT: u32 = 50;

/// The result of the withholding tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingTaxResult {
    /// The tax withheld from the monthly basic pay.
    pub tax_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the withholding tax on the monthly basic pay.
///
/// The tax is a flat percentage of the monthly basic pay. The rate must lie
/// within `[0, 50]` percent.
///
/// # Arguments
///
/// * `monthly_basic` - The monthly basic pay
/// * `rate_percent` - The withholding rate, in percent
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `WithholdingTaxResult` containing the tax deduction and an
/// audit step, or `InvalidTaxRate` if the rate is outside the allowed range.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::calculate_withholding_tax;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_withholding_tax(
///     Decimal::from_str("35000").unwrap(),
///     Decimal::from_str("20").unwrap(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.tax_deduction, Decimal::from_str("7000").unwrap());
/// ```
pub fn calculate_withholding_tax(
    monthly_basic: Decimal,
    rate_percent: Decimal,
    step_number: u32,
) -> EngineResult<WithholdingTaxResult> {
    if rate_percent < Decimal::from(MIN_TAX_RATE_PERCENT)
        || rate_percent > Decimal::from(MAX_TAX_RATE_PERCENT)
    {
        return Err(EngineError::InvalidTaxRate { rate: rate_percent });
    }

    let tax_deduction = monthly_basic * rate_percent / Decimal::from(100);

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Basic Pay Withholding Tax".to_string(),
        reference: "RA 10963 (TRAIN)".to_string(),
        input: serde_json::json!({
            "monthly_basic": monthly_basic.normalize().to_string(),
            "rate_percent": rate_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax_deduction": tax_deduction.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {}% = {}",
            monthly_basic.normalize(),
            rate_percent.normalize(),
            tax_deduction.normalize()
        ),
    };

    Ok(WithholdingTaxResult {
        tax_deduction,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// WT-001: 20% of 35000 is 7000
    #[test]
    fn test_wt_001_twenty_percent_of_35000() {
        let result = calculate_withholding_tax(dec("35000"), dec("20"), 1).unwrap();

        assert_eq!(result.tax_deduction, dec("7000"));
        assert_eq!(result.audit_step.rule_id, "withholding_tax");
        assert!(result.audit_step.reasoning.contains("35000"));
        assert!(result.audit_step.reasoning.contains("7000"));
    }

    /// WT-002: zero rate withholds nothing
    #[test]
    fn test_wt_002_zero_rate_withholds_nothing() {
        let result = calculate_withholding_tax(dec("35000"), dec("0"), 1).unwrap();

        assert_eq!(result.tax_deduction, Decimal::ZERO);
    }

    /// WT-003: maximum rate of 50 is allowed
    #[test]
    fn test_wt_003_maximum_rate_is_allowed() {
        let result = calculate_withholding_tax(dec("35000"), dec("50"), 1).unwrap();

        assert_eq!(result.tax_deduction, dec("17500"));
    }

    /// WT-004: rate above 50 is rejected
    #[test]
    fn test_wt_004_rate_above_maximum_is_rejected() {
        let result = calculate_withholding_tax(dec("35000"), dec("50.01"), 1);

        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxRate { rate }) if rate == dec("50.01")
        ));
    }

    /// WT-005: negative rate is rejected
    #[test]
    fn test_wt_005_negative_rate_is_rejected() {
        let result = calculate_withholding_tax(dec("35000"), dec("-5"), 1);

        assert!(matches!(result, Err(EngineError::InvalidTaxRate { .. })));
    }

    #[test]
    fn test_fractional_rate() {
        let result = calculate_withholding_tax(dec("30000"), dec("12.5"), 1).unwrap();

        assert_eq!(result.tax_deduction, dec("3750"));
    }

    #[test]
    fn test_zero_basic_pay() {
        let result = calculate_withholding_tax(Decimal::ZERO, dec("20"), 1).unwrap();

        assert_eq!(result.tax_deduction, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_has_correct_step_number() {
        let result = calculate_withholding_tax(dec("35000"), dec("20"), 7).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
    }

    #[test]
    fn test_audit_step_records_rate() {
        let result = calculate_withholding_tax(dec("35000"), dec("20"), 1).unwrap();

        assert_eq!(
            result.audit_step.input["rate_percent"].as_str().unwrap(),
            "20"
        );
    }
}
