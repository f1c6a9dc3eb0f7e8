//! Mortgage request layer: turns purchase-level inputs (price, down payment,
//! annual percentage rate, years) into [`LoanTerms`], applies the lender limits
//! and adds affordability figures on top of the schedule.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageCalcError;
use crate::schedule::{
    compute_schedule, LoanTerms, PaymentRow, Prepayment, PrepaymentStrategy, ScheduleInput,
    ScheduleSummary,
};
use crate::types::{with_metadata, ComputationOutput, Money, Months, Rate};
use crate::MortgageCalcResult;

/// Largest share of income a lender lets the monthly payment take.
const MAX_PAYMENT_TO_INCOME: Decimal = dec!(0.4);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Bounds applied to a request before it is scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageLimits {
    pub min_loan: Money,
    pub max_loan: Money,
    /// Annual rate bounds, in percent.
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    /// Down payment bounds as a share of the total amount.
    pub min_down_share: Rate,
    pub max_down_share: Rate,
}

impl Default for MortgageLimits {
    fn default() -> Self {
        Self {
            min_loan: dec!(500_000),
            max_loan: dec!(40_000_000),
            min_rate: Decimal::ZERO,
            max_rate: dec!(40),
            min_down_share: dec!(0.15),
            max_down_share: dec!(0.70),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A mortgage calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageRequest {
    /// Property price.
    pub total_amount: Money,
    pub down_payment: Money,
    /// Annual interest rate in percent (12 = 12% a year).
    pub annual_rate: Decimal,
    pub years: u32,
    #[serde(default)]
    pub prepayments: Vec<Prepayment>,
    #[serde(default)]
    pub strategy: PrepaymentStrategy,
    /// Clamp inputs to `limits` before scheduling.
    #[serde(default = "default_true")]
    pub apply_limits: bool,
    #[serde(default)]
    pub limits: MortgageLimits,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    /// Down payment as a percentage of the total amount, within [0, 100].
    pub down_payment_percent: Decimal,
    /// Income at which the initial payment is the maximum allowed share.
    pub min_income: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    /// Total amount after limits.
    pub total_amount: Money,
    /// Down payment after limits.
    pub down_payment: Money,
    /// Annual rate (percent) after limits.
    pub annual_rate: Decimal,
    pub monthly_rate: Rate,
    pub term_months: Months,
    pub strategy: PrepaymentStrategy,
    #[serde(flatten)]
    pub summary: ScheduleSummary,
    pub affordability: Affordability,
    pub guard_triggered: bool,
    pub schedule: Vec<PaymentRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate, clamp and schedule a mortgage request.
pub fn calculate_mortgage(
    request: &MortgageRequest,
) -> MortgageCalcResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    validate(request)?;

    let mut warnings = Vec::new();
    let (total_amount, down_payment, annual_rate) = if request.apply_limits {
        apply_limits(request, &mut warnings)?
    } else {
        (request.total_amount, request.down_payment, request.annual_rate)
    };

    let terms = LoanTerms {
        principal: (total_amount - down_payment).max(Decimal::ZERO),
        monthly_rate: annual_rate / dec!(12) / dec!(100),
        term_months: request.years.saturating_mul(12),
        strategy: request.strategy,
    };
    let schedule_input = ScheduleInput {
        terms,
        prepayments: request.prepayments.clone(),
    };
    let (schedule, schedule_warnings) = compute_schedule(&schedule_input);
    warnings.extend(schedule_warnings);

    let affordability = affordability(total_amount, down_payment, schedule.summary.monthly_payment);

    let output = MortgageOutput {
        total_amount,
        down_payment,
        annual_rate,
        monthly_rate: schedule_input.terms.monthly_rate,
        term_months: schedule_input.terms.term_months,
        strategy: request.strategy,
        summary: schedule.summary,
        affordability,
        guard_triggered: schedule.guard_triggered,
        schedule: schedule.schedule,
    };

    let methodology = match request.strategy {
        PrepaymentStrategy::ReducePayment => "Annuity mortgage, prepayments reduce payment",
        PrepaymentStrategy::ReduceTerm => "Annuity mortgage, prepayments reduce term",
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, request, warnings, elapsed, output))
}

/// Parse a JSON request body and run [`calculate_mortgage`].
pub fn calculate_mortgage_json(json: &str) -> MortgageCalcResult<ComputationOutput<MortgageOutput>> {
    let request: MortgageRequest = serde_json::from_str(json)?;
    calculate_mortgage(&request)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate(request: &MortgageRequest) -> MortgageCalcResult<()> {
    if request.total_amount < Decimal::ZERO {
        return Err(MortgageCalcError::InvalidInput {
            field: "total_amount".into(),
            reason: "Total amount cannot be negative".into(),
        });
    }
    if request.down_payment < Decimal::ZERO {
        return Err(MortgageCalcError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if request.annual_rate < Decimal::ZERO {
        return Err(MortgageCalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    let l = &request.limits;
    if l.min_loan > l.max_loan || l.min_rate > l.max_rate || l.min_down_share > l.max_down_share {
        return Err(MortgageCalcError::InvalidInput {
            field: "limits".into(),
            reason: "Each lower limit must not exceed its upper limit".into(),
        });
    }
    Ok(())
}

/// Clamp amount, then rate, then the down payment relative to the clamped
/// amount. Every change is reported.
fn apply_limits(
    request: &MortgageRequest,
    warnings: &mut Vec<String>,
) -> MortgageCalcResult<(Money, Money, Decimal)> {
    let limits = &request.limits;

    let total_amount = request.total_amount.clamp(limits.min_loan, limits.max_loan);
    if total_amount != request.total_amount {
        warnings.push(format!(
            "Total amount {} clamped to {}",
            request.total_amount, total_amount
        ));
    }

    let annual_rate = request.annual_rate.clamp(limits.min_rate, limits.max_rate);
    if annual_rate != request.annual_rate {
        warnings.push(format!(
            "Annual rate {}% clamped to {}%",
            request.annual_rate, annual_rate
        ));
    }

    let down_payment = if total_amount > Decimal::ZERO {
        let share_of_total = |share: Rate| {
            total_amount
                .checked_mul(share)
                .ok_or_else(|| MortgageCalcError::InvalidInput {
                    field: "limits".into(),
                    reason: format!("Down payment share {share} of {total_amount} is out of range"),
                })
        };
        let min_dp = share_of_total(limits.min_down_share)?;
        let max_dp = share_of_total(limits.max_down_share)?;
        request.down_payment.clamp(min_dp, max_dp)
    } else {
        Decimal::ZERO
    };
    if down_payment != request.down_payment {
        warnings.push(format!(
            "Down payment {} clamped to {}",
            request.down_payment, down_payment
        ));
    }

    Ok((total_amount, down_payment, annual_rate))
}

fn affordability(total_amount: Money, down_payment: Money, monthly_payment: Money) -> Affordability {
    let down_payment_percent = if total_amount > Decimal::ZERO {
        // A ratio too large to represent is far above 100%.
        down_payment
            .checked_div(total_amount)
            .and_then(|share| share.checked_mul(dec!(100)))
            .unwrap_or(dec!(100))
            .clamp(Decimal::ZERO, dec!(100))
    } else {
        Decimal::ZERO
    };
    let min_income = if monthly_payment > Decimal::ZERO {
        monthly_payment
            .checked_div(MAX_PAYMENT_TO_INCOME)
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    Affordability {
        down_payment_percent,
        min_income,
    }
}
