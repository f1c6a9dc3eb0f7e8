//! Month-by-month amortisation with prepayments.
//!
//! The loop state is (balance, payment, month). Each month splits the payment
//! into interest and principal, applies any prepayment, reconciles overshoot
//! and, under [`PrepaymentStrategy::ReducePayment`], re-solves the annuity for
//! the months left in the original term.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use super::annuity::annuity_payment;
use super::prepayments::PrepaymentSchedule;
use super::{LoanTerms, PaymentRow, PrepaymentStrategy};
use crate::types::{Money, Months};

/// Balance at or below which the loan is considered repaid.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Hard cap on simulated months, as a multiple of the scheduled term.
pub const MAX_TERM_MULTIPLE: Months = 3;

/// Upper bound on rows reserved up front; longer schedules grow on demand.
const ROW_RESERVE_LIMIT: Months = 1200;

/// Rows produced by [`amortize`] and whether the iteration cap cut them short.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SteppedSchedule {
    pub rows: Vec<PaymentRow>,
    pub guard_triggered: bool,
}

/// Simulate the loan from month 1 starting at `initial_payment`.
///
/// Stops once the balance is within [`BALANCE_EPSILON`] of zero or after
/// `term_months * MAX_TERM_MULTIPLE` months, whichever comes first. Both
/// strategies keep paying past the original term if a balance remains.
pub fn amortize(
    terms: &LoanTerms,
    prepayments: &PrepaymentSchedule,
    initial_payment: Money,
) -> SteppedSchedule {
    let rate = terms.monthly_rate;
    let max_months = terms.term_months.saturating_mul(MAX_TERM_MULTIPLE);

    let mut balance = terms.principal;
    let mut payment = initial_payment;
    let mut month: Months = 1;
    let mut rows = Vec::with_capacity(terms.term_months.min(ROW_RESERVE_LIMIT) as usize);

    while balance > BALANCE_EPSILON && month <= max_months {
        let interest = if rate.is_zero() {
            Decimal::ZERO
        } else {
            match balance.checked_mul(rate) {
                Some(i) => i,
                None => break,
            }
        };
        let principal = payment - interest;

        balance = match balance.checked_sub(principal) {
            Some(b) => b,
            None => break,
        };

        let mut prepayment = prepayments.amount_for(month);
        if prepayment > Decimal::ZERO {
            balance = match balance.checked_sub(prepayment) {
                Some(b) => b,
                // Far past zero: only what was still owed can be prepaid.
                None => {
                    prepayment = balance.max(Decimal::ZERO);
                    Decimal::ZERO
                }
            };
        }

        // Overshoot comes out of the prepayment first, then the balance is clamped.
        if balance < Decimal::ZERO {
            if prepayment > Decimal::ZERO {
                prepayment = (prepayment + balance).max(Decimal::ZERO);
            }
            balance = Decimal::ZERO;
        } else if balance <= BALANCE_EPSILON {
            balance = Decimal::ZERO;
        }

        rows.push(PaymentRow {
            month,
            payment,
            principal: principal.max(Decimal::ZERO),
            interest: interest.max(Decimal::ZERO),
            balance,
            prepayment,
        });

        if prepayment > Decimal::ZERO
            && balance > BALANCE_EPSILON
            && terms.strategy == PrepaymentStrategy::ReducePayment
        {
            let remaining = terms.term_months.saturating_sub(month).max(1);
            payment = annuity_payment(balance, rate, remaining);
            debug!(month, %balance, %payment, remaining, "payment recalculated after prepayment");
        }

        month += 1;
    }

    let guard_triggered = balance > BALANCE_EPSILON;
    if guard_triggered {
        warn!(
            months = rows.len(),
            %balance,
            "amortisation stopped at the iteration cap with balance outstanding"
        );
    }

    SteppedSchedule {
        rows,
        guard_triggered,
    }
}
