use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use salesdash::core::{
    DashboardVariant, OrderRecord, ReviewScore, RevenueBasis, StateCode, decimal_to_f64,
    mean_review_score, orders_by_weekday, revenue_by_state, rollup_by, total_revenue,
};
use salesdash::filter::{FilterAction, FilterState};

const STATUSES: [&str; 4] = ["delivered", "shipped", "canceled", "invoiced"];

fn record_strategy() -> impl Strategy<Value = OrderRecord> {
    (
        0usize..STATUSES.len(),
        proptest::option::of(0usize..StateCode::ALL.len()),
        proptest::option::of(0i64..500_000),
        proptest::option::of(-1i64..7),
        0u32..28,
        0u32..6,
    )
        .prop_map(|(status, state, cents, review, day, order_slot)| {
            let mut record = OrderRecord::new(format!("o{order_slot}"), STATUSES[status])
                .with_review(review.and_then(ReviewScore::new));
            if let Some(index) = state {
                record = record.with_customer_state(StateCode::ALL[index]);
            }
            if let Some(cents) = cents {
                record = record.with_payment(Decimal::new(cents, 2));
            }
            if let Some(at) = NaiveDate::from_ymd_opt(2024, 2, day + 1)
                .and_then(|date| date.and_hms_opt(8, 30, 0))
            {
                record = record.with_purchase(at);
            }
            record
        })
}

proptest! {
    #[test]
    fn revenue_is_non_negative_and_matches_delivered_sum(
        records in proptest::collection::vec(record_strategy(), 0..64)
    ) {
        let revenue = total_revenue(&records);
        prop_assert!(revenue >= Decimal::ZERO);
        let expected: Decimal = records
            .iter()
            .filter(|r| r.order_status.as_deref() == Some("delivered"))
            .map(|r| r.payment_value.unwrap_or(Decimal::ZERO))
            .sum();
        prop_assert_eq!(revenue, expected);
    }

    #[test]
    fn state_rollup_sums_to_whole_set_revenue(
        records in proptest::collection::vec(record_strategy(), 0..64)
    ) {
        let refs: Vec<&OrderRecord> = records.iter().collect();
        let by_state = revenue_by_state(&refs, DashboardVariant::Product, RevenueBasis::Gross);
        let partitioned: Decimal = by_state.values().copied().sum();
        let with_state: Vec<&OrderRecord> = refs
            .iter()
            .copied()
            .filter(|r| r.customer_state.is_some())
            .collect();
        prop_assert_eq!(partitioned, total_revenue(with_state));

        let by_key = rollup_by(refs.iter().copied(), |r| r.customer_state, |group| {
            total_revenue(group.iter().copied())
        });
        let all: Decimal = by_key.values().copied().sum();
        prop_assert_eq!(all, total_revenue(&records));
    }

    #[test]
    fn weekday_buckets_cover_every_record(
        records in proptest::collection::vec(record_strategy(), 0..64)
    ) {
        let refs: Vec<&OrderRecord> = records.iter().collect();
        let buckets = orders_by_weekday(&refs, DashboardVariant::Product);
        prop_assert_eq!(buckets.len(), 7);
        let counted: usize = buckets.iter().map(|b| b.order_count).sum();
        prop_assert_eq!(counted, records.len());
        let paid: Decimal = buckets.iter().map(|b| b.payment_value).sum();
        let expected: Decimal = records.iter().map(OrderRecord::payment_or_zero).sum();
        assert_abs_diff_eq!(decimal_to_f64(paid), decimal_to_f64(expected), epsilon = 1e-6);
    }

    #[test]
    fn review_mean_stays_within_score_bounds(
        records in proptest::collection::vec(record_strategy(), 0..64)
    ) {
        let mean = mean_review_score(&records);
        prop_assert!(mean == 0.0 || (1.0..=5.0).contains(&mean));
    }

    #[test]
    fn reset_is_idempotent_from_any_state(
        state_index in 0usize..StateCode::ALL.len(),
        segment in "[a-z_]{0,12}",
        pick in 0u8..3
    ) {
        let action = match pick {
            0 => FilterAction::SelectGeography(Some(StateCode::ALL[state_index])),
            1 => FilterAction::SelectSegment(Some(segment)),
            _ => FilterAction::ResetAll,
        };
        let state = FilterState::cleared().apply(action);
        let reset = state.apply(FilterAction::ResetAll);
        prop_assert_eq!(&reset, &FilterState::cleared());
        prop_assert_eq!(reset.apply(FilterAction::ResetAll), reset);
    }
}
