use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::geography::StateCode;
use super::metrics::{net_revenue, total_revenue};
use super::types::OrderRecord;

/// Which dashboard page the pipeline feeds.
///
/// The variant decides which record fields back the geography and segment
/// filters, and how revenue is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    /// Customer geography, product-category segments, gross revenue.
    #[default]
    Product,
    /// Seller geography, seller-id segments, revenue net of freight.
    Seller,
}

/// How revenue totals treat freight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueBasis {
    Gross,
    NetOfFreight,
}

impl RevenueBasis {
    #[must_use]
    pub fn total<'a, I>(self, records: I) -> Decimal
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        match self {
            Self::Gross => total_revenue(records),
            Self::NetOfFreight => net_revenue(records),
        }
    }
}

const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

impl DashboardVariant {
    /// State that places a record on the map and in the geography filter.
    #[must_use]
    pub fn geography_of(self, record: &OrderRecord) -> Option<StateCode> {
        match self {
            Self::Product => record.customer_state,
            Self::Seller => record.seller_state,
        }
    }

    /// Segment label used by the segment filter and ranking.
    #[must_use]
    pub fn segment_of(self, record: &OrderRecord) -> Option<&str> {
        match self {
            Self::Product => record.product_category_name_english.as_deref(),
            Self::Seller => record.seller_id.as_deref(),
        }
    }

    #[must_use]
    pub fn default_revenue_basis(self) -> RevenueBasis {
        match self {
            Self::Product => RevenueBasis::Gross,
            Self::Seller => RevenueBasis::NetOfFreight,
        }
    }

    /// Day order of the weekday trend chart.
    #[must_use]
    pub fn weekday_order(self) -> [Weekday; 7] {
        match self {
            Self::Product => MONDAY_FIRST,
            Self::Seller => SUNDAY_FIRST,
        }
    }

    /// Whether the weekday trend only counts delivered records.
    #[must_use]
    pub fn weekday_trend_delivered_only(self) -> bool {
        matches!(self, Self::Seller)
    }
}
