use mortgage_calc_core::schedule::{
    amortize, calculate_schedule, LoanTerms, Prepayment, PrepaymentSchedule, PrepaymentStrategy,
    ScheduleInput,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn strategy() -> impl Strategy<Value = PrepaymentStrategy> {
    prop_oneof![
        Just(PrepaymentStrategy::ReducePayment),
        Just(PrepaymentStrategy::ReduceTerm),
    ]
}

fn terms() -> impl Strategy<Value = LoanTerms> {
    // principal 10k..20M, annual rate 0..40% in basis points, 1..30 years
    (10_000i64..20_000_000, 0i64..=4000, 1u32..=30, strategy()).prop_map(
        |(principal, bps, years, strategy)| LoanTerms {
            principal: Decimal::from(principal),
            monthly_rate: Decimal::from(bps) / dec!(10000) / dec!(12),
            term_months: years * 12,
            strategy,
        },
    )
}

fn prepayments() -> impl Strategy<Value = Vec<Prepayment>> {
    prop::collection::vec(
        (1i64..=360, 1i64..=2_000_000).prop_map(|(m, a)| Prepayment::new(m, Decimal::from(a))),
        1..6,
    )
}

fn input(terms: LoanTerms, prepayments: Vec<Prepayment>) -> ScheduleInput {
    ScheduleInput { terms, prepayments }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_no_prepayment_runs_full_term(t in terms()) {
        let out = calculate_schedule(&input(t.clone(), vec![])).result;
        prop_assert_eq!(out.schedule.len() as u32, t.term_months);
        prop_assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
        let principal_sum: Decimal = out.schedule.iter().map(|r| r.principal).sum();
        prop_assert!((principal_sum - t.principal).abs() <= dec!(0.01));
    }

    #[test]
    fn prop_rows_never_negative_and_balance_never_rises(t in terms(), p in prepayments()) {
        let out = calculate_schedule(&input(t.clone(), p)).result;
        let mut previous = t.principal;
        for row in &out.schedule {
            prop_assert!(row.balance <= previous);
            prop_assert!(row.balance >= Decimal::ZERO);
            prop_assert!(row.principal >= Decimal::ZERO);
            prop_assert!(row.interest >= Decimal::ZERO);
            prop_assert!(row.prepayment >= Decimal::ZERO);
            previous = row.balance;
        }
        prop_assert!(!out.guard_triggered);
        prop_assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
        prop_assert!(out.schedule.len() as u32 <= t.term_months);
    }

    #[test]
    fn prop_prepayment_reduces_interest(t in terms(), p in prepayments()) {
        prop_assume!(!t.monthly_rate.is_zero());
        // Only prepayments that land inside the schedule make a difference.
        prop_assume!(p.iter().any(|x| (x.month as u32) < t.term_months));
        let without = calculate_schedule(&input(t.clone(), vec![])).result;
        let with = calculate_schedule(&input(t, p)).result;
        prop_assert!(with.summary.total_interest < without.summary.total_interest);
    }

    #[test]
    fn prop_total_paid_counts_every_payment_and_prepayment(t in terms(), p in prepayments()) {
        let out = calculate_schedule(&input(t, p)).result;
        let expected: Decimal = out.schedule.iter().map(|r| r.payment + r.prepayment).sum();
        prop_assert_eq!(out.summary.total_paid, expected);
        prop_assert_eq!(out.summary.overpayment, out.summary.total_interest);
    }

    #[test]
    fn prop_guard_bounds_underpaying_loans(t in terms(), fraction in 1i64..100) {
        prop_assume!(!t.monthly_rate.is_zero());
        // Any payment below the first month's interest.
        let payment = t.principal * t.monthly_rate * Decimal::from(fraction) / dec!(100);
        let out = amortize(&t, &PrepaymentSchedule::default(), payment);
        prop_assert!(out.guard_triggered);
        prop_assert_eq!(out.rows.len() as u32, t.term_months * 3);
    }
}
