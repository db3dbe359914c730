//! Shared input validation for calculation functions.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Rejects negative monetary input with an `InvalidAmount` error.
pub(crate) fn non_negative(field: &str, amount: Decimal) -> EngineResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            message: format!("amount {} cannot be negative", amount),
        });
    }
    Ok(amount)
}
