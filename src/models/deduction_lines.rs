//! The fixed record of other-deduction line items.
//!
//! The payroll office collects a fixed catalogue of deductions beyond the
//! mandated contributions and GSIS loans: cooperative and bank loan
//! amortizations, association dues, campus produce purchases, and utility
//! bills. Each is a named field of this record, not a caller-supplied key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The fixed set of other-deduction line items.
///
/// Every field defaults to zero; an absent line means no deduction. The field
/// set mirrors the configured deduction rules one-to-one
/// ([`FIELD_NAMES`](Self::FIELD_NAMES) lists the rule ids).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeductionLines {
    /// Refund of over-withheld income tax from a prior period.
    #[serde(default)]
    pub tax_refund: Decimal,
    /// Retroactive PhilHealth premium adjustment.
    #[serde(default)]
    pub philhealth_adjustment: Decimal,
    /// Cooperative multi-purpose loan amortization.
    #[serde(default)]
    pub mpl: Decimal,
    /// Calamity loan amortization.
    #[serde(default)]
    pub cal: Decimal,
    /// Pag-IBIG MP2 voluntary savings.
    #[serde(default)]
    pub mp2: Decimal,
    /// SSS salary loan amortization.
    #[serde(default)]
    pub sss_loan: Decimal,
    /// CFI cooperative loan amortization.
    #[serde(default)]
    pub cfi: Decimal,
    /// CBB loan amortization.
    #[serde(default)]
    pub cbb: Decimal,
    /// FCB bank loan amortization.
    #[serde(default)]
    pub fcb_loan: Decimal,
    /// VASTA association dues.
    #[serde(default)]
    pub vasta: Decimal,
    /// Mutual death aid fund contribution.
    #[serde(default)]
    pub death_aid: Decimal,
    /// Employee association monthly contribution.
    #[serde(default)]
    pub monthly_contribution: Decimal,
    /// PANGPAT association dues.
    #[serde(default)]
    pub pangpat: Decimal,
    /// Employee association annual dues.
    #[serde(default)]
    pub annual_dues: Decimal,
    /// General fund contribution.
    #[serde(default)]
    pub gf: Decimal,
    /// Staff trust fund contribution.
    #[serde(default)]
    pub stf: Decimal,
    /// COA notice of disallowance settlement.
    #[serde(default)]
    pub notice_of_disallowance: Decimal,
    /// Campus paddy rice purchase.
    #[serde(default)]
    pub paddy_rice: Decimal,
    /// Campus broiler chicken purchase.
    #[serde(default)]
    pub broiler_chicken: Decimal,
    /// Campus eggplant produce purchase.
    #[serde(default)]
    pub talong: Decimal,
    /// Campus okra produce purchase.
    #[serde(default)]
    pub okra: Decimal,
    /// Campus mung bean produce purchase.
    #[serde(default)]
    pub batong: Decimal,
    /// Campus string bean produce purchase.
    #[serde(default)]
    pub sitaw: Decimal,
    /// Campus chili produce purchase.
    #[serde(default)]
    pub sili: Decimal,
    /// Campus housing water bill.
    #[serde(default)]
    pub water_bill: Decimal,
    /// Campus housing electric bill.
    #[serde(default)]
    pub electric_bill: Decimal,
}

impl DeductionLines {
    /// The rule ids of every line item, in declaration order.
    pub const FIELD_NAMES: [&'static str; 26] = [
        "tax_refund",
        "philhealth_adjustment",
        "mpl",
        "cal",
        "mp2",
        "sss_loan",
        "cfi",
        "cbb",
        "fcb_loan",
        "vasta",
        "death_aid",
        "monthly_contribution",
        "pangpat",
        "annual_dues",
        "gf",
        "stf",
        "notice_of_disallowance",
        "paddy_rice",
        "broiler_chicken",
        "talong",
        "okra",
        "batong",
        "sitaw",
        "sili",
        "water_bill",
        "electric_bill",
    ];

    /// Returns every line item as a `(rule id, amount)` pair, in declaration order.
    pub fn line_items(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("tax_refund", self.tax_refund),
            ("philhealth_adjustment", self.philhealth_adjustment),
            ("mpl", self.mpl),
            ("cal", self.cal),
            ("mp2", self.mp2),
            ("sss_loan", self.sss_loan),
            ("cfi", self.cfi),
            ("cbb", self.cbb),
            ("fcb_loan", self.fcb_loan),
            ("vasta", self.vasta),
            ("death_aid", self.death_aid),
            ("monthly_contribution", self.monthly_contribution),
            ("pangpat", self.pangpat),
            ("annual_dues", self.annual_dues),
            ("gf", self.gf),
            ("stf", self.stf),
            ("notice_of_disallowance", self.notice_of_disallowance),
            ("paddy_rice", self.paddy_rice),
            ("broiler_chicken", self.broiler_chicken),
            ("talong", self.talong),
            ("okra", self.okra),
            ("batong", self.batong),
            ("sitaw", self.sitaw),
            ("sili", self.sili),
            ("water_bill", self.water_bill),
            ("electric_bill", self.electric_bill),
        ]
    }

    /// Returns the amount for a line item by rule id, if the id is known.
    pub fn line(&self, name: &str) -> Option<Decimal> {
        self.line_items()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, amount)| amount)
    }

    /// Sets the amount for a line item by rule id.
    ///
    /// # Errors
    ///
    /// Returns `DeductionRuleNotFound` when the id does not name a field of
    /// the fixed set.
    pub fn set_line(&mut self, name: &str, amount: Decimal) -> EngineResult<()> {
        let field = match name {
            "tax_refund" => &mut self.tax_refund,
            "philhealth_adjustment" => &mut self.philhealth_adjustment,
            "mpl" => &mut self.mpl,
            "cal" => &mut self.cal,
            "mp2" => &mut self.mp2,
            "sss_loan" => &mut self.sss_loan,
            "cfi" => &mut self.cfi,
            "cbb" => &mut self.cbb,
            "fcb_loan" => &mut self.fcb_loan,
            "vasta" => &mut self.vasta,
            "death_aid" => &mut self.death_aid,
            "monthly_contribution" => &mut self.monthly_contribution,
            "pangpat" => &mut self.pangpat,
            "annual_dues" => &mut self.annual_dues,
            "gf" => &mut self.gf,
            "stf" => &mut self.stf,
            "notice_of_disallowance" => &mut self.notice_of_disallowance,
            "paddy_rice" => &mut self.paddy_rice,
            "broiler_chicken" => &mut self.broiler_chicken,
            "talong" => &mut self.talong,
            "okra" => &mut self.okra,
            "batong" => &mut self.batong,
            "sitaw" => &mut self.sitaw,
            "sili" => &mut self.sili,
            "water_bill" => &mut self.water_bill,
            "electric_bill" => &mut self.electric_bill,
            _ => {
                return Err(EngineError::DeductionRuleNotFound {
                    name: name.to_string(),
                });
            }
        };
        *field = amount;
        Ok(())
    }
}
