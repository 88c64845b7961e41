pub mod dataset;
pub mod format;
pub mod geography;
pub mod metrics;
pub mod primitives;
pub mod ranking;
pub mod rollup;
pub mod types;
pub mod variant;
pub mod weekday;

pub use dataset::DatasetStore;
pub use format::{
    NO_DATA_LABEL, format_brl, format_category_name, format_count, format_delivery, format_review,
};
pub use geography::{BoundaryFeature, BoundaryProperties, GeographyBoundaries, StateCode};
pub use metrics::{
    DeliveryTime, avg_delivery_time_days, delivered_count, distinct_delivered_orders,
    distinct_products, distinct_sellers, mean_review_score, net_revenue, total_revenue,
};
pub use primitives::{decimal_to_f64, parse_decimal, parse_timestamp};
pub use ranking::{DEFAULT_TOP_N, RankedEntry, Ranking, SortDirection, sort_and_truncate};
pub use rollup::{
    MonthlyPoint, Rollup, WeekdayBucket, delivered_by_customer_state, delivered_by_seller,
    delivery_by_state, monthly_trend, orders_by_category, orders_by_weekday, revenue_by_state,
    reviews_by_state, rollup_by, rollup_by_known, sellers_by_state, top_by_metric,
};
pub use types::{DELIVERED_STATUS, OrderRecord, ReviewScore};
pub use variant::{DashboardVariant, RevenueBasis};
pub use weekday::{ALL_WEEKS_LABEL, WeekdaySelector};
