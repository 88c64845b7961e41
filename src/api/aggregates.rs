use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    DashboardVariant, DeliveryTime, GeographyBoundaries, MonthlyPoint, OrderRecord, Ranking,
    RevenueBasis, SortDirection, StateCode, WeekdayBucket, avg_delivery_time_days,
    delivered_by_customer_state, delivered_by_seller, distinct_delivered_orders,
    distinct_products, format_brl, format_count, format_delivery, format_review,
    mean_review_score, monthly_trend, orders_by_category, orders_by_weekday, sort_and_truncate,
};
use crate::extensions::{AggregateKey, AggregateValue};

use super::map_view::{MapStats, MapView, StateRollups};

/// Ranking directions for the two bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub segment: SortDirection,
    pub geography: SortDirection,
}

/// Which ranking a sort change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTarget {
    Segment,
    Geography,
}

impl SortTarget {
    #[must_use]
    pub fn aggregate_key(self) -> AggregateKey {
        match self {
            Self::Segment => AggregateKey::SegmentRanking,
            Self::Geography => AggregateKey::GeographyRanking,
        }
    }
}

/// State ranking: revenue on the product page, delivered count on the seller page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", content = "ranking", rename_all = "snake_case")]
pub enum GeographyRanking {
    Revenue(Ranking<StateCode, Decimal>),
    Deliveries(Ranking<StateCode, usize>),
}

impl GeographyRanking {
    #[must_use]
    pub fn states(&self) -> Vec<StateCode> {
        match self {
            Self::Revenue(ranking) => ranking.entries.iter().map(|entry| entry.key).collect(),
            Self::Deliveries(ranking) => ranking.entries.iter().map(|entry| entry.key).collect(),
        }
    }

    #[must_use]
    pub fn direction(&self) -> SortDirection {
        match self {
            Self::Revenue(ranking) => ranking.direction,
            Self::Deliveries(ranking) => ranking.direction,
        }
    }
}

pub(crate) struct AggregateInputs<'a> {
    pub(crate) variant: DashboardVariant,
    pub(crate) basis: RevenueBasis,
    pub(crate) top_n: usize,
    pub(crate) sort: SortState,
    pub(crate) boundaries: &'a GeographyBoundaries,
    pub(crate) selected: Option<StateCode>,
}

/// Every derived value for one visible subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAggregates {
    pub visible_records: usize,
    pub total_revenue: Decimal,
    pub mean_review: f64,
    pub avg_delivery: DeliveryTime,
    pub total_products: usize,
    pub total_delivered_orders: usize,
    pub map_stats: MapStats,
    pub map: MapView,
    pub segment_ranking: Ranking<String, usize>,
    pub geography_ranking: GeographyRanking,
    pub weekday_trend: Vec<WeekdayBucket>,
    pub monthly_trend: Vec<MonthlyPoint>,
}

impl DashboardAggregates {
    pub(crate) fn compute(visible: &[&OrderRecord], inputs: &AggregateInputs<'_>) -> Self {
        let variant = inputs.variant;
        let state_rollups = StateRollups::compute(visible, variant, inputs.basis);

        let aggregates = Self {
            visible_records: visible.len(),
            total_revenue: inputs.basis.total(visible.iter().copied()),
            mean_review: mean_review_score(visible.iter().copied()),
            avg_delivery: avg_delivery_time_days(visible.iter().copied()),
            total_products: distinct_products(visible.iter().copied()),
            total_delivered_orders: distinct_delivered_orders(visible.iter().copied()),
            map_stats: state_rollups.stats(),
            map: state_rollups.map_view(inputs.boundaries, inputs.selected),
            segment_ranking: segment_ranking(visible, inputs),
            geography_ranking: geography_ranking(visible, &state_rollups, inputs),
            weekday_trend: orders_by_weekday(visible, variant),
            monthly_trend: monthly_trend(visible, variant),
        };
        trace!(
            visible = aggregates.visible_records,
            revenue = %aggregates.total_revenue,
            "aggregates computed"
        );
        aggregates
    }

    /// Payload for a data key; control keys are answered by the controls.
    #[must_use]
    pub fn value_for(&self, key: AggregateKey) -> Option<AggregateValue> {
        let value = match key {
            AggregateKey::TotalRevenue => AggregateValue::Currency {
                amount: self.total_revenue,
                text: format_brl(self.total_revenue),
            },
            AggregateKey::MeanReview => AggregateValue::Score {
                value: self.mean_review,
                text: format_review(self.mean_review),
            },
            AggregateKey::AvgDeliveryTime => AggregateValue::Delivery {
                time: self.avg_delivery,
                text: format_delivery(self.avg_delivery),
            },
            AggregateKey::TotalProducts => AggregateValue::Count {
                value: self.total_products,
                text: format_count(self.total_products),
            },
            AggregateKey::TotalDeliveredOrders => AggregateValue::Count {
                value: self.total_delivered_orders,
                text: format_count(self.total_delivered_orders),
            },
            AggregateKey::MapStats => AggregateValue::MapStats(self.map_stats),
            AggregateKey::StateMap => AggregateValue::StateMap(self.map.clone()),
            AggregateKey::SegmentRanking => {
                AggregateValue::SegmentRanking(self.segment_ranking.clone())
            }
            AggregateKey::GeographyRanking => {
                AggregateValue::GeographyRanking(self.geography_ranking.clone())
            }
            AggregateKey::WeekdayTrend => AggregateValue::WeekdayTrend {
                buckets: self.weekday_trend.clone(),
            },
            AggregateKey::MonthlyTrend => AggregateValue::MonthlyTrend {
                points: self.monthly_trend.clone(),
            },
            AggregateKey::DashboardTitle
            | AggregateKey::StateDropdown
            | AggregateKey::WeekdayDropdown => return None,
        };
        Some(value)
    }
}

fn segment_ranking(visible: &[&OrderRecord], inputs: &AggregateInputs<'_>) -> Ranking<String, usize> {
    let rollup = match inputs.variant {
        DashboardVariant::Product => orders_by_category(visible),
        DashboardVariant::Seller => delivered_by_seller(visible),
    };
    sort_and_truncate(&rollup, inputs.sort.segment, inputs.top_n)
}

fn geography_ranking(
    visible: &[&OrderRecord],
    state_rollups: &StateRollups,
    inputs: &AggregateInputs<'_>,
) -> GeographyRanking {
    match inputs.variant {
        DashboardVariant::Product => GeographyRanking::Revenue(sort_and_truncate(
            state_rollups.revenue(),
            inputs.sort.geography,
            inputs.top_n,
        )),
        DashboardVariant::Seller => GeographyRanking::Deliveries(sort_and_truncate(
            &delivered_by_customer_state(visible),
            inputs.sort.geography,
            inputs.top_n,
        )),
    }
}
