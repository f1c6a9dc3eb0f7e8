//! Display formatting for currency amounts: space-grouped thousands and an
//! optional two-digit fraction, e.g. `1 234 567.89`.

use rust_decimal::Decimal;

/// Format `value` with a space as thousands separator.
///
/// With `with_decimals` the value is rounded (half to even) to two places and
/// always shows both digits; otherwise it is rounded to a whole number.
pub fn format_currency(value: Decimal, with_decimals: bool) -> String {
    let dp = if with_decimals { 2 } else { 0 };
    let mut rounded = value.round_dp(dp);
    rounded.rescale(dp);

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Prepayment cell for tabular exports: `-` when nothing was prepaid.
pub fn format_prepayment_cell(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format_currency(value, true)
    } else {
        "-".to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
