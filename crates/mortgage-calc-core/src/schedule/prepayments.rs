//! Aggregation of raw (month, amount) prepayment records into a per-month
//! lookup used by the stepper.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Months};

/// A single extra contribution towards principal.
///
/// `month` is 1-based. It is signed so that malformed records coming from
/// callers can be represented and then dropped by [`PrepaymentSchedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prepayment {
    pub month: i64,
    pub amount: Money,
}

impl Prepayment {
    pub fn new(month: i64, amount: Money) -> Self {
        Self { month, amount }
    }
}

/// Total prepayment per month. Absent months prepay nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrepaymentSchedule {
    amounts: BTreeMap<Months, Money>,
    discarded: usize,
}

impl PrepaymentSchedule {
    /// Sum records by month, silently discarding any whose month is not
    /// positive or whose amount is not positive. A record that would
    /// overflow its month's total is discarded as well.
    pub fn from_records(records: &[Prepayment]) -> Self {
        let mut amounts: BTreeMap<Months, Money> = BTreeMap::new();
        let mut discarded = 0;

        for record in records {
            let month = match Months::try_from(record.month) {
                Ok(m) if m > 0 => m,
                _ => {
                    discarded += 1;
                    continue;
                }
            };
            if record.amount <= Decimal::ZERO {
                discarded += 1;
                continue;
            }
            let total = amounts.entry(month).or_insert(Decimal::ZERO);
            match total.checked_add(record.amount) {
                Some(sum) => *total = sum,
                None => discarded += 1,
            }
        }

        Self { amounts, discarded }
    }

    pub fn amount_for(&self, month: Months) -> Money {
        self.amounts.get(&month).copied().unwrap_or(Decimal::ZERO)
    }

    /// Number of input records dropped during aggregation.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}
