//! pt-BR presentation helpers. The calculation modules never call these;
//! they exist for reports, validation messages and the bindings.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::types::{Money, Percent};

/// `R$ 1.234,56`. Negative values render as `-R$ 1.234,56`.
pub fn format_currency(value: Money) -> String {
    let (negative, body) = split_sign(value, 2);
    if negative {
        format!("-R$ {body}")
    } else {
        format!("R$ {body}")
    }
}

/// `1.234,56`, grouped with dots and two decimals after a comma.
pub fn format_number(value: Decimal) -> String {
    let (negative, body) = split_sign(value, 2);
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Whole number with thousands grouping: `300.000`.
pub fn format_integer(value: Decimal) -> String {
    let (negative, body) = split_sign(value, 0);
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// `12.34%`, from percentage points.
pub fn format_percent(value: Percent) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}%")
}

/// Reverse of [`format_currency`]: keeps digits, the comma and the minus sign,
/// reading the first comma as the decimal separator. The longest leading number
/// is used and trailing garbage ignored (`"12,34,5"` is 12.34); no leading
/// number at all is zero.
pub fn parse_currency(text: &str) -> Money {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();
    let normalised = cleaned.replacen(',', ".", 1);
    Decimal::from_str(leading_number(&normalised)).unwrap_or(Decimal::ZERO)
}

/// Longest prefix shaped like `-?digits[.digits]`.
fn leading_number(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }
    &text[..end]
}

/// Short pt-BR date and time: `19/10/2026, 14:05`.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y, %H:%M").to_string()
}

fn split_sign(value: Decimal, dp: u32) -> (bool, String) {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", dp as usize, rounded.abs());

    let body = match plain.split_once('.') {
        Some((int_digits, frac_digits)) => format!("{},{}", group_thousands(int_digits), frac_digits),
        None => group_thousands(&plain),
    };
    (negative, body)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
