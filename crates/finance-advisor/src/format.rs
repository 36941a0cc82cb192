//! Money and percentage formatting for advice messages.

use rust_decimal::Decimal;

pub const CURRENCY: &str = "₹";

/// Whole-unit amount with thousands separators, e.g. `1,234,568`
pub fn amount(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Amount prefixed with the currency symbol
pub fn money(value: Decimal) -> String {
    format!("{CURRENCY}{}", amount(value))
}

/// One decimal place, no sign
pub fn percent(value: Decimal) -> String {
    format!("{:.1}", value.round_dp(1))
}
