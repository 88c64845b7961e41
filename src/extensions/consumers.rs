use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::{ControlState, GeographyRanking, MapStats, MapView};
use crate::core::{
    DashboardVariant, DeliveryTime, MonthlyPoint, Ranking, StateCode, WeekdayBucket,
};
use crate::filter::FilterState;

/// Stable identifier of one published aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregateKey {
    TotalRevenue,
    MeanReview,
    AvgDeliveryTime,
    TotalProducts,
    TotalDeliveredOrders,
    MapStats,
    StateMap,
    SegmentRanking,
    GeographyRanking,
    WeekdayTrend,
    MonthlyTrend,
    DashboardTitle,
    StateDropdown,
    WeekdayDropdown,
}

impl AggregateKey {
    pub const ALL: [AggregateKey; 14] = [
        Self::TotalRevenue,
        Self::MeanReview,
        Self::AvgDeliveryTime,
        Self::TotalProducts,
        Self::TotalDeliveredOrders,
        Self::MapStats,
        Self::StateMap,
        Self::SegmentRanking,
        Self::GeographyRanking,
        Self::WeekdayTrend,
        Self::MonthlyTrend,
        Self::DashboardTitle,
        Self::StateDropdown,
        Self::WeekdayDropdown,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TotalRevenue => "total-revenue",
            Self::MeanReview => "mean-review",
            Self::AvgDeliveryTime => "avg-delivery-time",
            Self::TotalProducts => "total-products",
            Self::TotalDeliveredOrders => "total-delivered-orders",
            Self::MapStats => "map-stats",
            Self::StateMap => "state-map",
            Self::SegmentRanking => "segment-ranking",
            Self::GeographyRanking => "geography-ranking",
            Self::WeekdayTrend => "weekday-trend",
            Self::MonthlyTrend => "monthly-trend",
            Self::DashboardTitle => "dashboard-title",
            Self::StateDropdown => "state-dropdown",
            Self::WeekdayDropdown => "weekday-dropdown",
        }
    }

    #[must_use]
    pub fn from_str_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == key)
    }

    /// Keys that mirror filter state rather than data.
    #[must_use]
    pub fn is_control(self) -> bool {
        matches!(
            self,
            Self::DashboardTitle | Self::StateDropdown | Self::WeekdayDropdown
        )
    }

    /// Keys published by a dashboard variant, in dispatch order.
    #[must_use]
    pub fn published_by(variant: DashboardVariant) -> &'static [AggregateKey] {
        match variant {
            DashboardVariant::Product => &[
                Self::TotalRevenue,
                Self::MeanReview,
                Self::AvgDeliveryTime,
                Self::MapStats,
                Self::StateMap,
                Self::SegmentRanking,
                Self::GeographyRanking,
                Self::WeekdayTrend,
                Self::MonthlyTrend,
                Self::DashboardTitle,
                Self::StateDropdown,
                Self::WeekdayDropdown,
            ],
            DashboardVariant::Seller => &[
                Self::TotalRevenue,
                Self::TotalProducts,
                Self::TotalDeliveredOrders,
                Self::StateMap,
                Self::SegmentRanking,
                Self::GeographyRanking,
                Self::WeekdayTrend,
                Self::MonthlyTrend,
                Self::DashboardTitle,
                Self::StateDropdown,
                Self::WeekdayDropdown,
            ],
        }
    }
}

impl fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload pushed to consumers. Scalar variants carry display text alongside
/// the typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateValue {
    Currency { amount: Decimal, text: String },
    Score { value: f64, text: String },
    Delivery { time: DeliveryTime, text: String },
    Count { value: usize, text: String },
    MapStats(MapStats),
    StateMap(MapView),
    SegmentRanking(Ranking<String, usize>),
    GeographyRanking(GeographyRanking),
    WeekdayTrend { buckets: Vec<WeekdayBucket> },
    MonthlyTrend { points: Vec<MonthlyPoint> },
    Text { text: String },
    Selection { selected: String, options: Vec<String> },
}

impl AggregateValue {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Currency { text, .. }
            | Self::Score { text, .. }
            | Self::Delivery { text, .. }
            | Self::Count { text, .. }
            | Self::Text { text } => Some(text),
            Self::Selection { selected, .. } => Some(selected),
            _ => None,
        }
    }
}

/// Read-only pipeline state passed alongside every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerContext {
    pub variant: DashboardVariant,
    pub filter: FilterState,
    pub visible_records: usize,
    pub total_records: usize,
    /// Increments on every recompute.
    pub revision: u64,
}

/// A chart, counter, title, or dropdown fed by the dispatch controller.
///
/// Consumers receive derived values only. They cannot reach the dataset or
/// the filter state machine.
pub trait ViewConsumer {
    fn id(&self) -> &str;
    fn update(&mut self, key: AggregateKey, value: &AggregateValue, context: &ConsumerContext);
}

/// Adapts a closure into a [`ViewConsumer`].
pub struct FnConsumer<F> {
    id: String,
    callback: F,
}

impl<F> FnConsumer<F>
where
    F: FnMut(AggregateKey, &AggregateValue, &ConsumerContext),
{
    #[must_use]
    pub fn new(id: impl Into<String>, callback: F) -> Self {
        Self {
            id: id.into(),
            callback,
        }
    }
}

impl<F> ViewConsumer for FnConsumer<F>
where
    F: FnMut(AggregateKey, &AggregateValue, &ConsumerContext),
{
    fn id(&self) -> &str {
        &self.id
    }

    fn update(&mut self, key: AggregateKey, value: &AggregateValue, context: &ConsumerContext) {
        (self.callback)(key, value, context);
    }
}

fn selection_value(selected: Option<StateCode>, options: &[StateCode]) -> AggregateValue {
    AggregateValue::Selection {
        selected: selected.map(|s| s.code().to_owned()).unwrap_or_default(),
        options: options.iter().map(|s| s.code().to_owned()).collect(),
    }
}

pub(crate) fn control_value(key: AggregateKey, controls: &ControlState) -> Option<AggregateValue> {
    match key {
        AggregateKey::DashboardTitle => Some(AggregateValue::Text {
            text: controls.title.clone(),
        }),
        AggregateKey::StateDropdown => {
            Some(selection_value(controls.state_selection, &controls.state_options))
        }
        AggregateKey::WeekdayDropdown => Some(AggregateValue::Selection {
            selected: controls.weekday_selection.clone(),
            options: controls.weekday_options.clone(),
        }),
        _ => None,
    }
}
