//! Scalar summaries over an already filtered record collection.
//!
//! Every function is total: empty or all-invalid input yields a neutral value.

use std::collections::HashSet;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::OrderRecord;

/// Mean delivery time, or an explicit marker when no valid sample exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DeliveryTime {
    Days(f64),
    NoData,
}

impl DeliveryTime {
    #[must_use]
    pub fn days(self) -> Option<f64> {
        match self {
            Self::Days(days) => Some(days),
            Self::NoData => None,
        }
    }

    #[must_use]
    pub fn is_no_data(self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Sum of `payment_value` over delivered records.
#[must_use]
pub fn total_revenue<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_delivered())
        .map(OrderRecord::payment_or_zero)
        .sum()
}

/// Delivered payments minus delivered freight.
#[must_use]
pub fn net_revenue<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_delivered())
        .map(|record| record.payment_or_zero() - record.freight_or_zero())
        .sum()
}

/// Mean review score, one vote per order.
///
/// Records are deduplicated by `order_id` first; a later line for the same
/// order replaces the earlier one. Records without an `order_id` each count
/// as their own order. Returns `0.0` when no valid review remains.
#[must_use]
pub fn mean_review_score<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut by_order: IndexMap<&str, &OrderRecord> = IndexMap::new();
    let mut anonymous: Vec<&OrderRecord> = Vec::new();
    for record in records {
        match record.order_id.as_deref() {
            Some(order_id) => {
                by_order.insert(order_id, record);
            }
            None => anonymous.push(record),
        }
    }

    let (sum, count) = by_order
        .values()
        .chain(anonymous.iter())
        .filter(|record| record.is_delivered())
        .filter_map(|record| record.review_score)
        .fold((0u64, 0u64), |(sum, count), score| {
            (sum + u64::from(score.get()), count + 1)
        });

    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Mean delivery duration in days over delivered records.
#[must_use]
pub fn avg_delivery_time_days<'a, I>(records: I) -> DeliveryTime
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let (sum, count) = records
        .into_iter()
        .filter(|record| record.is_delivered())
        .filter_map(OrderRecord::delivery_days)
        .fold((0i64, 0u64), |(sum, count), days| (sum + days, count + 1));

    if count == 0 {
        return DeliveryTime::NoData;
    }
    DeliveryTime::Days(sum as f64 / count as f64)
}

/// Number of distinct product ids, ignoring records without one.
#[must_use]
pub fn distinct_products<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.product_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Number of distinct delivered order ids.
#[must_use]
pub fn distinct_delivered_orders<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_delivered())
        .filter_map(|record| record.order_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Number of distinct seller ids.
#[must_use]
pub fn distinct_sellers<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.seller_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

#[must_use]
pub fn delivered_count<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_delivered())
        .count()
}
