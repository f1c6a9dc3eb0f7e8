//! Annuity amortisation schedule with irregular prepayments.
//!
//! Pipeline: [`PrepaymentSchedule::from_records`] → [`annuity_payment`] for the
//! initial payment → [`amortize`] (re-solving the annuity after prepayments
//! when reducing the payment) → [`summarize`]. Every call builds fresh state;
//! nothing here is shared between calculations.

pub mod annuity;
pub mod prepayments;
pub mod stepper;
pub mod summary;

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{with_metadata, ComputationOutput, Money, Months, Rate};

pub use annuity::annuity_payment;
pub use prepayments::{Prepayment, PrepaymentSchedule};
pub use stepper::{amortize, SteppedSchedule, BALANCE_EPSILON, MAX_TERM_MULTIPLE};
pub use summary::{summarize, ScheduleSummary};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// What happens after a prepayment.
///
/// Parsed from strings leniently: only `"reduce_payment"` selects
/// [`PrepaymentStrategy::ReducePayment`]; anything else is
/// [`PrepaymentStrategy::ReduceTerm`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PrepaymentStrategy {
    /// Keep the term, lower the monthly payment.
    #[default]
    ReducePayment,
    /// Keep the payment, finish earlier.
    ReduceTerm,
}

impl PrepaymentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrepaymentStrategy::ReducePayment => "reduce_payment",
            PrepaymentStrategy::ReduceTerm => "reduce_term",
        }
    }
}

impl From<&str> for PrepaymentStrategy {
    fn from(s: &str) -> Self {
        if s == "reduce_payment" {
            PrepaymentStrategy::ReducePayment
        } else {
            PrepaymentStrategy::ReduceTerm
        }
    }
}

impl From<String> for PrepaymentStrategy {
    fn from(s: String) -> Self {
        PrepaymentStrategy::from(s.as_str())
    }
}

/// Loan parameters after the down payment has been taken off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount owed.
    pub principal: Money,
    /// Monthly interest rate as a decimal (0.01 = 1% per month).
    pub monthly_rate: Rate,
    /// Scheduled number of months.
    pub term_months: Months,
    #[serde(default)]
    pub strategy: PrepaymentStrategy,
}

/// Schedule calculation input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub terms: LoanTerms,
    #[serde(default)]
    pub prepayments: Vec<Prepayment>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub month: Months,
    /// Scheduled payment for the month.
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Outstanding after the payment and any prepayment.
    pub balance: Money,
    /// Prepayment actually applied, after overshoot correction.
    pub prepayment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    #[serde(flatten)]
    pub summary: ScheduleSummary,
    pub term_months: Months,
    /// True when the iteration cap ended the schedule with balance outstanding.
    pub guard_triggered: bool,
    pub schedule: Vec<PaymentRow>,
}

impl ScheduleOutput {
    fn empty(term_months: Months) -> Self {
        Self {
            summary: ScheduleSummary::default(),
            term_months,
            guard_triggered: false,
            schedule: Vec::new(),
        }
    }

    /// Months saved against the scheduled term (zero if the loan ran longer).
    pub fn months_saved(&self) -> Months {
        self.term_months.saturating_sub(self.summary.payoff_months)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the amortisation schedule for `input`.
///
/// Total over its input domain: degenerate loans (non-positive principal or
/// zero term) produce an empty schedule with an all-zero summary, and
/// numerical trouble surfaces as warnings rather than errors.
pub fn calculate_schedule(input: &ScheduleInput) -> ComputationOutput<ScheduleOutput> {
    let start = Instant::now();
    let (output, warnings) = compute_schedule(input);
    let methodology = match input.terms.strategy {
        PrepaymentStrategy::ReducePayment => "Annuity amortisation, prepayments reduce payment",
        PrepaymentStrategy::ReduceTerm => "Annuity amortisation, prepayments reduce term",
    };
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(methodology, input, warnings, elapsed, output)
}

pub(crate) fn compute_schedule(input: &ScheduleInput) -> (ScheduleOutput, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut terms = input.terms.clone();

    if terms.principal <= Decimal::ZERO || terms.term_months == 0 {
        debug!(principal = %terms.principal, term_months = terms.term_months, "degenerate loan, empty schedule");
        return (ScheduleOutput::empty(terms.term_months), warnings);
    }

    if terms.monthly_rate < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly rate {} treated as zero",
            terms.monthly_rate
        ));
        terms.monthly_rate = Decimal::ZERO;
    }

    let prepayments = PrepaymentSchedule::from_records(&input.prepayments);
    if prepayments.discarded() > 0 {
        warnings.push(format!(
            "{} prepayment record(s) with non-positive month or amount ignored",
            prepayments.discarded()
        ));
    }

    let initial_payment = annuity_payment(terms.principal, terms.monthly_rate, terms.term_months);
    let stepped = amortize(&terms, &prepayments, initial_payment);

    if stepped.guard_triggered {
        let outstanding = stepped
            .rows
            .last()
            .map(|r| r.balance)
            .unwrap_or(terms.principal);
        warnings.push(format!(
            "Schedule stopped after {} months (cap of {}x the {}-month term) with {} outstanding",
            stepped.rows.len(),
            MAX_TERM_MULTIPLE,
            terms.term_months,
            outstanding
        ));
    }

    let summary = summarize(terms.principal, initial_payment, &stepped.rows);
    (
        ScheduleOutput {
            summary,
            term_months: terms.term_months,
            guard_triggered: stepped.guard_triggered,
            schedule: stepped.rows,
        },
        warnings,
    )
}
