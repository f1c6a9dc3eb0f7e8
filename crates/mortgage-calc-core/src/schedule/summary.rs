use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentRow;
use crate::types::{Money, Months};

/// Totals folded from a completed schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Principal amortised (amount owed after the down payment).
    pub principal: Money,
    /// Payment before any recalculation.
    pub monthly_payment: Money,
    /// Every scheduled payment plus every prepayment.
    pub total_paid: Money,
    pub total_interest: Money,
    /// Interest only; prepaid principal is not an overpayment.
    pub overpayment: Money,
    pub total_prepayment: Money,
    /// Number of months until the schedule ended.
    pub payoff_months: Months,
}

pub fn summarize(principal: Money, monthly_payment: Money, rows: &[PaymentRow]) -> ScheduleSummary {
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_prepayment = Decimal::ZERO;

    // Totals saturate at Decimal::MAX instead of overflowing.
    for row in rows {
        total_paid = total_paid
            .saturating_add(row.payment)
            .saturating_add(row.prepayment);
        total_interest = total_interest.saturating_add(row.interest);
        total_prepayment = total_prepayment.saturating_add(row.prepayment);
    }

    ScheduleSummary {
        principal,
        monthly_payment,
        total_paid,
        total_interest,
        overpayment: total_interest,
        total_prepayment,
        payoff_months: rows.len() as Months,
    }
}
