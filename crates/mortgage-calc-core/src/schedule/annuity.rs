//! Closed-form level payment for an annuity loan.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::types::{Money, Months, Rate};

/// Fixed monthly payment that fully amortises `balance` over `months` at
/// `monthly_rate`.
///
/// `P = B * r * (1+r)^n / ((1+r)^n - 1)`, or `B / n` when the rate is zero.
/// A growth factor that does not exceed one (or overflows) falls back to
/// straight-line. `months == 0` is treated as a single remaining month and a
/// non-positive balance needs no payment, so the function never fails.
pub fn annuity_payment(balance: Money, monthly_rate: Rate, months: Months) -> Money {
    if balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let n = months.max(1);
    let straight_line = balance / Decimal::from(n);

    if monthly_rate.is_zero() {
        return straight_line;
    }

    let factor = match (Decimal::ONE + monthly_rate).checked_powu(u64::from(n)) {
        Some(f) if f > Decimal::ONE => f,
        _ => return straight_line,
    };

    // Payment per unit of balance first, so large balances stay in range.
    monthly_rate
        .checked_mul(factor)
        .and_then(|v| v.checked_div(factor - Decimal::ONE))
        .and_then(|per_unit| balance.checked_mul(per_unit))
        .unwrap_or(straight_line)
}
