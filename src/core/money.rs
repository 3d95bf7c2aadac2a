//! Validation for dollar amounts stored as `DECIMAL(8, 2)`.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;

/// Largest value a `DECIMAL(8, 2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Checks that `amount` is non-negative, fits eight digits and has at most
/// two decimal places.
pub fn validate_amount(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() || amount > MAX_AMOUNT || amount.round_dp(2) != amount {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

/// Restores the two-place scale of an amount read back from storage.
///
/// `SQLite` keeps `DECIMAL(8, 2)` values as REAL, so `600.00` reads back as
/// `600` and `0.10` as `0.1`.
#[must_use]
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut scaled = amount.round_dp(2);
    scaled.rescale(2);
    scaled
}
