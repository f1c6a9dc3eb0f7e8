use mortgage_calc_core::schedule::{
    annuity_payment, calculate_schedule, LoanTerms, Prepayment, PrepaymentStrategy,
    ScheduleInput, ScheduleOutput,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn four_million_loan(strategy: PrepaymentStrategy) -> LoanTerms {
    // 4M owed, 12% a year (1% a month), 20 years
    LoanTerms {
        principal: dec!(4_000_000),
        monthly_rate: dec!(0.01),
        term_months: 240,
        strategy,
    }
}

fn run(terms: LoanTerms, prepayments: Vec<Prepayment>) -> ScheduleOutput {
    calculate_schedule(&ScheduleInput { terms, prepayments }).result
}

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{msg}: expected ~{expected}, got {actual} (diff = {diff})"
    );
}

// ===========================================================================
// No prepayments
// ===========================================================================

#[test]
fn test_reference_loan_without_prepayments() {
    let out = run(four_million_loan(PrepaymentStrategy::ReducePayment), vec![]);

    assert_close(out.summary.monthly_payment, dec!(44043.45), dec!(0.01), "initial payment");
    assert_eq!(out.schedule.len(), 240);
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
    assert!(!out.guard_triggered);

    let principal_sum: Decimal = out.schedule.iter().map(|r| r.principal).sum();
    assert_close(principal_sum, dec!(4_000_000), dec!(0.01), "principal amortised");

    // Total paid is 240 level payments; interest is the rest.
    assert_close(
        out.summary.total_paid,
        out.summary.monthly_payment * dec!(240),
        dec!(0.0001),
        "total paid",
    );
    assert_close(
        out.summary.total_interest,
        out.summary.total_paid - dec!(4_000_000),
        dec!(0.01),
        "total interest",
    );
    assert_eq!(out.summary.overpayment, out.summary.total_interest);
    assert_eq!(out.summary.total_prepayment, Decimal::ZERO);
}

#[test]
fn test_rows_split_payment_into_interest_and_principal() {
    let out = run(four_million_loan(PrepaymentStrategy::ReduceTerm), vec![]);
    for row in &out.schedule {
        assert_close(
            row.principal + row.interest,
            row.payment,
            dec!(0.0000001),
            &format!("month {}", row.month),
        );
    }
    assert_eq!(out.schedule[0].interest, dec!(40_000));
}

#[test]
fn test_zero_rate_is_straight_line() {
    let terms = LoanTerms {
        principal: dec!(1_200_000),
        monthly_rate: Decimal::ZERO,
        term_months: 120,
        strategy: PrepaymentStrategy::ReducePayment,
    };
    let out = run(terms, vec![]);
    assert_eq!(out.schedule.len(), 120);
    assert!(out.schedule.iter().all(|r| r.interest.is_zero()));
    assert!(out.schedule.iter().all(|r| r.payment == dec!(10_000)));
    assert_eq!(out.summary.total_interest, Decimal::ZERO);
    assert_eq!(out.summary.total_paid, dec!(1_200_000));
}

// ===========================================================================
// Prepayments
// ===========================================================================

#[test]
fn test_reduce_payment_reference_scenario() {
    let baseline = run(four_million_loan(PrepaymentStrategy::ReducePayment), vec![]);
    let out = run(
        four_million_loan(PrepaymentStrategy::ReducePayment),
        vec![Prepayment::new(12, dec!(500_000))],
    );

    assert_eq!(out.schedule[11].prepayment, dec!(500_000));
    assert!(out.schedule[12].payment < out.schedule[0].payment);
    assert!(out.summary.total_interest < baseline.summary.total_interest);
    assert_eq!(out.schedule.len(), 240);
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);

    // The recalculated payment amortises the post-prepayment balance over 228 months.
    let expected = annuity_payment(out.schedule[11].balance, dec!(0.01), 228);
    assert_eq!(out.schedule[12].payment, expected);

    // The headline payment is still the original one.
    assert_eq!(out.summary.monthly_payment, baseline.summary.monthly_payment);
    assert_eq!(out.summary.total_prepayment, dec!(500_000));
}

#[test]
fn test_reduce_term_shortens_schedule() {
    let out = run(
        four_million_loan(PrepaymentStrategy::ReduceTerm),
        vec![Prepayment::new(12, dec!(500_000))],
    );
    let first = out.schedule[0].payment;
    assert!(out.schedule.iter().all(|r| r.payment == first));
    assert!(out.schedule.len() < 240);
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
    assert!(out.months_saved() > 0);
}

#[test]
fn test_reduce_term_saves_more_interest_than_reduce_payment() {
    let prepay = vec![Prepayment::new(12, dec!(500_000))];
    let by_payment = run(four_million_loan(PrepaymentStrategy::ReducePayment), prepay.clone());
    let by_term = run(four_million_loan(PrepaymentStrategy::ReduceTerm), prepay);
    assert!(by_term.summary.total_interest < by_payment.summary.total_interest);
}

#[test]
fn test_same_month_prepayments_are_combined() {
    let split = run(
        four_million_loan(PrepaymentStrategy::ReducePayment),
        vec![
            Prepayment::new(24, dec!(200_000)),
            Prepayment::new(24, dec!(300_000)),
        ],
    );
    let single = run(
        four_million_loan(PrepaymentStrategy::ReducePayment),
        vec![Prepayment::new(24, dec!(500_000))],
    );
    assert_eq!(split.schedule, single.schedule);
}

#[test]
fn test_prepayment_clearing_the_loan_is_trimmed() {
    let out = run(
        four_million_loan(PrepaymentStrategy::ReducePayment),
        vec![Prepayment::new(3, dec!(10_000_000))],
    );
    assert_eq!(out.schedule.len(), 3);
    let last = &out.schedule[2];
    assert_eq!(last.balance, Decimal::ZERO);
    assert!(last.prepayment < dec!(4_000_000));
    assert!(last.prepayment > dec!(3_900_000));
    assert!(!out.guard_triggered);
}

#[test]
fn test_prepayment_after_payoff_month_is_never_applied() {
    let terms = LoanTerms {
        principal: dec!(100_000),
        monthly_rate: dec!(0.01),
        term_months: 12,
        strategy: PrepaymentStrategy::ReduceTerm,
    };
    let out = run(terms, vec![Prepayment::new(50, dec!(1_000))]);
    assert_eq!(out.schedule.len(), 12);
    assert_eq!(out.summary.total_prepayment, Decimal::ZERO);
}

#[test]
fn test_prepayment_in_last_month_of_reduce_payment() {
    // Recalculation after the scheduled term uses a one-month horizon.
    let terms = LoanTerms {
        principal: dec!(100_000),
        monthly_rate: dec!(0.01),
        term_months: 12,
        strategy: PrepaymentStrategy::ReducePayment,
    };
    let out = run(terms, vec![Prepayment::new(11, dec!(1))]);
    assert_eq!(out.schedule.len(), 12);
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_balance_monotonic_and_non_negative_with_many_prepayments() {
    let prepayments = (1..=20)
        .map(|i| Prepayment::new(i * 6, dec!(75_000)))
        .collect();
    let out = run(four_million_loan(PrepaymentStrategy::ReducePayment), prepayments);

    let mut previous = dec!(4_000_000);
    for row in &out.schedule {
        assert!(row.balance <= previous, "balance rose in month {}", row.month);
        assert!(row.balance >= Decimal::ZERO);
        assert!(row.principal >= Decimal::ZERO);
        assert!(row.interest >= Decimal::ZERO);
        assert!(row.prepayment >= Decimal::ZERO);
        previous = row.balance;
    }
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
}

// ===========================================================================
// Degenerate input
// ===========================================================================

#[test]
fn test_degenerate_loans_return_empty_result() {
    for (principal, term) in [(Decimal::ZERO, 240), (dec!(-5), 240), (dec!(1000), 0)] {
        let terms = LoanTerms {
            principal,
            monthly_rate: dec!(0.01),
            term_months: term,
            strategy: PrepaymentStrategy::ReducePayment,
        };
        let out = run(terms, vec![Prepayment::new(1, dec!(10))]);
        assert!(out.schedule.is_empty());
        assert_eq!(out.summary.principal, Decimal::ZERO);
        assert_eq!(out.summary.monthly_payment, Decimal::ZERO);
        assert_eq!(out.summary.total_paid, Decimal::ZERO);
        assert_eq!(out.summary.overpayment, Decimal::ZERO);
    }
}

#[test]
fn test_envelope_metadata() {
    let out = calculate_schedule(&ScheduleInput {
        terms: four_million_loan(PrepaymentStrategy::ReduceTerm),
        prepayments: vec![],
    });
    assert_eq!(out.methodology, "Annuity amortisation, prepayments reduce term");
    assert_eq!(out.assumptions["terms"]["strategy"], "reduce_term");
    assert!(out.warnings.is_empty());
}
