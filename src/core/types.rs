use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::geography::StateCode;
use super::primitives::{
    lenient_decimal, lenient_label, lenient_review, lenient_state, lenient_timestamp,
};

/// The only status counted as a completed order.
pub const DELIVERED_STATUS: &str = "delivered";

/// A submitted review score, always inside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReviewScore(u8);

impl ReviewScore {
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value as u8))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ReviewScore {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("review score {value} outside 1..=5"))
    }
}

impl From<ReviewScore> for i64 {
    fn from(score: ReviewScore) -> Self {
        i64::from(score.0)
    }
}

/// One order-line fact.
///
/// Fields are coerced on load: malformed values become `None` and drop out of
/// the computations that need them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, deserialize_with = "lenient_label")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub order_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_state")]
    pub customer_state: Option<StateCode>,
    #[serde(default, deserialize_with = "lenient_state")]
    pub seller_state: Option<StateCode>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub payment_value: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub freight_value: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_review")]
    pub review_score: Option<ReviewScore>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub product_category_name_english: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub seller_id: Option<String>,
}

impl OrderRecord {
    #[must_use]
    pub fn new(order_id: impl Into<String>, order_status: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            order_status: Some(order_status.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn delivered(order_id: impl Into<String>) -> Self {
        Self::new(order_id, DELIVERED_STATUS)
    }

    #[must_use]
    pub fn with_customer_state(mut self, state: StateCode) -> Self {
        self.customer_state = Some(state);
        self
    }

    #[must_use]
    pub fn with_seller_state(mut self, state: StateCode) -> Self {
        self.seller_state = Some(state);
        self
    }

    #[must_use]
    pub fn with_payment(mut self, value: Decimal) -> Self {
        self.payment_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_freight(mut self, value: Decimal) -> Self {
        self.freight_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_review(mut self, score: Option<ReviewScore>) -> Self {
        self.review_score = score;
        self
    }

    #[must_use]
    pub fn with_purchase(mut self, at: NaiveDateTime) -> Self {
        self.order_purchase_timestamp = Some(at);
        self
    }

    #[must_use]
    pub fn with_delivered_at(mut self, at: NaiveDateTime) -> Self {
        self.order_delivered_customer_date = Some(at);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category_name_english = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    #[must_use]
    pub fn with_seller(mut self, seller_id: impl Into<String>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.order_status.as_deref() == Some(DELIVERED_STATUS)
    }

    #[must_use]
    pub fn payment_or_zero(&self) -> Decimal {
        self.payment_value.unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn freight_or_zero(&self) -> Decimal {
        self.freight_value.unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn purchase_weekday(&self) -> Option<Weekday> {
        self.order_purchase_timestamp.map(|at| at.weekday())
    }

    /// First day of the purchase month.
    #[must_use]
    pub fn purchase_month(&self) -> Option<NaiveDate> {
        self.order_purchase_timestamp
            .and_then(|at| at.date().with_day(1))
    }

    /// Delivery duration in whole days, rounded up.
    ///
    /// `None` when either timestamp is missing or delivery precedes purchase.
    #[must_use]
    pub fn delivery_days(&self) -> Option<i64> {
        let purchase = self.order_purchase_timestamp?;
        let delivered = self.order_delivered_customer_date?;
        let elapsed_ms = (delivered - purchase).num_milliseconds();
        let days = (elapsed_ms as f64 / MILLIS_PER_DAY).ceil() as i64;
        (days >= 0).then_some(days)
    }
}

const MILLIS_PER_DAY: f64 = 86_400_000.0;
