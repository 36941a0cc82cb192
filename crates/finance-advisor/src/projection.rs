//! Projection Math
//!
//! Savings rate, percentage shares and the monthly-annuity future value
//! used for goal projections.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// `part / whole × 100`, or `None` when `whole` is zero or the share
/// leaves the decimal range
pub fn share_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)?.checked_mul(dec!(100))
}

/// Future value of a monthly deposit paid at the start of each month
/// (annuity due), compounded monthly at `annual_rate`.
///
/// `FV = m × (((1 + r/12)^n − 1) / (r/12)) × (1 + r/12)`
///
/// Returns `None` when the result leaves the decimal range.
pub fn future_value(
    monthly_deposit: Decimal,
    annual_rate: Decimal,
    months: u64,
) -> Option<Decimal> {
    let months_dec = Decimal::from(months);
    if annual_rate.is_zero() {
        return monthly_deposit.checked_mul(months_dec);
    }

    let r = annual_rate / dec!(12);
    let growth = (Decimal::ONE + r).checked_powu(months)?;
    let annuity_factor = (growth - Decimal::ONE).checked_div(r)?;
    monthly_deposit
        .checked_mul(annuity_factor)?
        .checked_mul(Decimal::ONE + r)
}
