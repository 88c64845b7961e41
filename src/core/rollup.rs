//! Grouping primitive and the per-dimension rollups built on it.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use chrono::{NaiveDate, Weekday};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::geography::StateCode;
use super::metrics::{DeliveryTime, avg_delivery_time_days, mean_review_score};
use super::types::OrderRecord;
use super::variant::{DashboardVariant, RevenueBasis};

/// Key → aggregate mapping in first-seen key order.
pub type Rollup<K, V> = IndexMap<K, V>;

/// Partitions `records` by `key_fn` and aggregates each partition.
///
/// Every record lands in exactly one partition, so for additive aggregates the
/// partition results sum to the aggregate over the whole input.
pub fn rollup_by<'a, I, K, V, KF, AF>(records: I, key_fn: KF, agg_fn: AF) -> Rollup<K, V>
where
    I: IntoIterator<Item = &'a OrderRecord>,
    K: Hash + Eq,
    KF: Fn(&OrderRecord) -> K,
    AF: Fn(&[&'a OrderRecord]) -> V,
{
    rollup_by_known(records, |record| Some(key_fn(record)), agg_fn)
}

/// Like [`rollup_by`], but records whose key is `None` are left out.
pub fn rollup_by_known<'a, I, K, V, KF, AF>(records: I, key_fn: KF, agg_fn: AF) -> Rollup<K, V>
where
    I: IntoIterator<Item = &'a OrderRecord>,
    K: Hash + Eq,
    KF: Fn(&OrderRecord) -> Option<K>,
    AF: Fn(&[&'a OrderRecord]) -> V,
{
    let mut groups: IndexMap<K, Vec<&'a OrderRecord>> = IndexMap::new();
    for record in records {
        if let Some(key) = key_fn(record) {
            groups.entry(key).or_default().push(record);
        }
    }
    groups
        .into_iter()
        .map(|(key, group)| {
            let value = agg_fn(&group);
            (key, value)
        })
        .collect()
}

/// Selects the entry that compares greatest under `compare`.
///
/// Ties resolve to the later entry. Pass a reversed comparator to select the
/// smallest value.
pub fn top_by_metric<K, V, C>(rollup: &Rollup<K, V>, compare: C) -> Option<(&K, &V)>
where
    C: Fn(&V, &V) -> Ordering,
{
    rollup.iter().max_by(|a, b| compare(a.1, b.1))
}

/// Revenue per geography state over delivered records.
#[must_use]
pub fn revenue_by_state(
    records: &[&OrderRecord],
    variant: DashboardVariant,
    basis: RevenueBasis,
) -> Rollup<StateCode, Decimal> {
    rollup_by_known(
        records.iter().copied().filter(|r| r.is_delivered()),
        |record| variant.geography_of(record),
        |group| basis.total(group.iter().copied()),
    )
}

/// Mean delivery days per geography state; states without samples are omitted.
#[must_use]
pub fn delivery_by_state(
    records: &[&OrderRecord],
    variant: DashboardVariant,
) -> Rollup<StateCode, f64> {
    rollup_by_known(
        records.iter().copied().filter(|r| r.is_delivered()),
        |record| variant.geography_of(record),
        |group| avg_delivery_time_days(group.iter().copied()),
    )
    .into_iter()
    .filter_map(|(state, time)| match time {
        DeliveryTime::Days(days) => Some((state, days)),
        DeliveryTime::NoData => None,
    })
    .collect()
}

/// Mean review per geography state, on the same terms as [`mean_review_score`].
///
/// States whose orders end up without a valid review are omitted.
#[must_use]
pub fn reviews_by_state(
    records: &[&OrderRecord],
    variant: DashboardVariant,
) -> Rollup<StateCode, f64> {
    rollup_by_known(
        records.iter().copied(),
        |record| variant.geography_of(record),
        |group| mean_review_score(group.iter().copied()),
    )
    .into_iter()
    .filter(|(_, mean)| *mean > 0.0)
    .collect()
}

/// Distinct delivering sellers per geography state.
#[must_use]
pub fn sellers_by_state(
    records: &[&OrderRecord],
    variant: DashboardVariant,
) -> Rollup<StateCode, usize> {
    rollup_by_known(
        records.iter().copied().filter(|r| r.is_delivered()),
        |record| variant.geography_of(record),
        |group| {
            group
                .iter()
                .filter_map(|record| record.seller_id.as_deref())
                .collect::<HashSet<_>>()
                .len()
        },
    )
}

/// Delivered line count per customer state.
#[must_use]
pub fn delivered_by_customer_state(records: &[&OrderRecord]) -> Rollup<StateCode, usize> {
    rollup_by_known(
        records.iter().copied().filter(|r| r.is_delivered()),
        |record| record.customer_state,
        <[&OrderRecord]>::len,
    )
}

/// Line count per product category, all statuses.
#[must_use]
pub fn orders_by_category(records: &[&OrderRecord]) -> Rollup<String, usize> {
    rollup_by_known(
        records.iter().copied(),
        |record| record.product_category_name_english.clone(),
        <[&OrderRecord]>::len,
    )
}

/// Delivered line count per seller.
#[must_use]
pub fn delivered_by_seller(records: &[&OrderRecord]) -> Rollup<String, usize> {
    rollup_by_known(
        records.iter().copied().filter(|r| r.is_delivered()),
        |record| record.seller_id.clone(),
        <[&OrderRecord]>::len,
    )
}

/// One bar of the weekday trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBucket {
    pub day: Weekday,
    pub order_count: usize,
    pub payment_value: Decimal,
}

/// Orders per purchase weekday, all seven days present in variant order.
#[must_use]
pub fn orders_by_weekday(records: &[&OrderRecord], variant: DashboardVariant) -> Vec<WeekdayBucket> {
    let delivered_only = variant.weekday_trend_delivered_only();
    let by_day = rollup_by_known(
        records
            .iter()
            .copied()
            .filter(|r| !delivered_only || r.is_delivered()),
        OrderRecord::purchase_weekday,
        |group| {
            let payment: Decimal = group.iter().map(|r| r.payment_or_zero()).sum();
            (group.len(), payment)
        },
    );

    variant
        .weekday_order()
        .into_iter()
        .map(|day| {
            let (order_count, payment_value) =
                by_day.get(&day).copied().unwrap_or((0, Decimal::ZERO));
            WeekdayBucket {
                day,
                order_count,
                payment_value,
            }
        })
        .collect()
}

/// One point of the monthly trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// First day of the month.
    pub month: NaiveDate,
    pub count: usize,
}

/// Monthly series, sorted by month: line counts for the product page and
/// distinct active sellers for the seller page.
#[must_use]
pub fn monthly_trend(records: &[&OrderRecord], variant: DashboardVariant) -> Vec<MonthlyPoint> {
    let by_month = rollup_by_known(
        records.iter().copied(),
        OrderRecord::purchase_month,
        |group| match variant {
            DashboardVariant::Product => group.len(),
            DashboardVariant::Seller => group
                .iter()
                .filter_map(|record| record.seller_id.as_deref())
                .collect::<HashSet<_>>()
                .len(),
        },
    );

    let mut points: Vec<MonthlyPoint> = by_month
        .into_iter()
        .map(|(month, count)| MonthlyPoint { month, count })
        .collect();
    points.sort_by_key(|point| point.month);
    points
}
