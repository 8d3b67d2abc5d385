//! Canonical text renderings shared by both record layouts.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Sign convention for currency amounts.
///
/// The two layouts disagree and both conventions must be kept exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountStyle {
    /// Unsigned øre digits followed by `' '` or `'-'` (G69).
    TrailingSpace,
    /// Øre digits zero-padded to the field width less one, then `'+'` or `'-'` (10Q).
    PaddedPlusMinus,
}

pub fn format_integer(n: i128) -> String {
    n.to_string()
}

/// `YYYYMMDD`.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y%m%d").to_string()
}

/// `0YYYYMMDDHHMM`, the 13-character 10Q timestamp.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("0%Y%m%d%H%M").to_string()
}

/// Area number: the tax year without its leading digit.
pub fn format_area_number(year: i32) -> String {
    year.to_string().chars().skip(1).collect()
}

/// Convert kroner to øre, truncating toward zero.
///
/// Returns `None` if the amount is too large to scale.
pub fn to_minor_units(amount: Decimal) -> Option<Decimal> {
    Some(amount.checked_mul(Decimal::ONE_HUNDRED)?.trunc())
}

fn split_sign(amount: Decimal) -> Option<(String, bool)> {
    let minor = to_minor_units(amount)?;
    let negative = minor.is_sign_negative() && !minor.is_zero();
    Some((minor.abs().normalize().to_string(), negative))
}

/// Øre digits followed by `' '` (non-negative) or `'-'` (negative).
pub fn format_amount_kr(amount: Decimal) -> Option<String> {
    let (digits, negative) = split_sign(amount)?;
    Some(format!("{digits}{}", if negative { '-' } else { ' ' }))
}

/// Øre digits zero-padded to `width - 1`, then `'+'` or `'-'`.
pub fn format_amount_signed(amount: Decimal, width: usize) -> Option<String> {
    let (digits, negative) = split_sign(amount)?;
    let pad = width.saturating_sub(1);
    Some(format!(
        "{digits:0>pad$}{}",
        if negative { '-' } else { '+' }
    ))
}

/// Left-pad with `'0'` to `width` characters. Longer values are untouched.
pub fn zero_pad(value: &str, width: usize) -> String {
    format!("{value:0>width$}")
}

/// Right-justify with spaces to `width` characters. Longer values are untouched.
pub fn right_justify(value: &str, width: usize) -> String {
    format!("{value:>width$}")
}

/// First `max` characters of `value`.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
