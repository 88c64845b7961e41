use approx::assert_relative_eq;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use salesdash::core::{
    DatasetStore, DeliveryTime, OrderRecord, ReviewScore, StateCode, avg_delivery_time_days,
    distinct_delivered_orders, distinct_products, format_review, mean_review_score, net_revenue,
    total_revenue,
};

fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid timestamp")
}

#[test]
fn revenue_sums_delivered_payments() {
    let records = [
        OrderRecord::delivered("a").with_payment(Decimal::new(100, 0)),
        OrderRecord::delivered("b").with_payment(Decimal::new(200, 0)),
        OrderRecord::delivered("c").with_payment(Decimal::new(50, 0)),
    ];
    assert_eq!(total_revenue(&records), Decimal::new(35000, 2));
}

#[test]
fn revenue_ignores_other_statuses_and_missing_payments() {
    let records = [
        OrderRecord::delivered("a").with_payment(Decimal::new(100, 0)),
        OrderRecord::new("b", "canceled").with_payment(Decimal::new(500, 0)),
        OrderRecord::delivered("c"),
    ];
    assert_eq!(total_revenue(&records), Decimal::new(100, 0));
    let empty: [OrderRecord; 0] = [];
    assert_eq!(total_revenue(&empty), Decimal::ZERO);
}

#[test]
fn net_revenue_subtracts_freight() {
    let records = [
        OrderRecord::delivered("a")
            .with_payment(Decimal::new(100, 0))
            .with_freight(Decimal::new(15, 0)),
        OrderRecord::delivered("b").with_payment(Decimal::new(40, 0)),
    ];
    assert_eq!(net_revenue(&records), Decimal::new(125, 0));
}

#[test]
fn review_mean_counts_each_order_once() {
    let five = ReviewScore::new(5);
    let records = [
        OrderRecord::delivered("o1").with_review(five),
        OrderRecord::delivered("o1").with_review(five),
    ];
    assert_eq!(format_review(mean_review_score(&records)), "5.00");
}

#[test]
fn review_mean_keeps_the_last_line_of_an_order() {
    let records = [
        OrderRecord::delivered("o1").with_review(ReviewScore::new(1)),
        OrderRecord::delivered("o2").with_review(ReviewScore::new(4)),
        OrderRecord::delivered("o1").with_review(ReviewScore::new(5)),
    ];
    assert_relative_eq!(mean_review_score(&records), 4.5);
}

#[test]
fn review_mean_is_neutral_without_valid_reviews() {
    let empty: [OrderRecord; 0] = [];
    assert_eq!(format_review(mean_review_score(&empty)), "0.00");
    let records = [
        OrderRecord::delivered("o1").with_review(None),
        OrderRecord::new("o2", "shipped").with_review(ReviewScore::new(3)),
    ];
    assert_eq!(mean_review_score(&records), 0.0);
}

#[test]
fn sentinel_reviews_are_dropped_on_load() {
    let raw = r#"[
        {"order_id": "a", "order_status": "delivered", "review_score": -1},
        {"order_id": "b", "order_status": "delivered", "review_score": null},
        {"order_id": "c", "order_status": "delivered", "review_score": "4"},
        {"order_id": "d", "order_status": "delivered", "review_score": 9}
    ]"#;
    let store = DatasetStore::from_json_str(raw).expect("parse records");
    let scores: Vec<_> = store.records().iter().map(|r| r.review_score).collect();
    assert_eq!(scores, vec![None, None, ReviewScore::new(4), None]);
    assert_relative_eq!(mean_review_score(store.records()), 4.0);
}

#[test]
fn delivery_time_rounds_up_and_skips_negative_durations() {
    let records = [
        OrderRecord::delivered("a")
            .with_purchase(at(1, 10))
            .with_delivered_at(at(3, 11)),
        OrderRecord::delivered("b")
            .with_purchase(at(5, 0))
            .with_delivered_at(at(4, 0)),
        OrderRecord::delivered("c").with_purchase(at(5, 0)),
    ];
    assert_eq!(avg_delivery_time_days(&records), DeliveryTime::Days(3.0));
}

#[test]
fn delivery_time_reports_no_data_instead_of_nan() {
    let records = [OrderRecord::delivered("a")
        .with_purchase(at(5, 0))
        .with_delivered_at(at(4, 0))];
    let time = avg_delivery_time_days(&records);
    assert!(time.is_no_data());
    assert_eq!(time.days(), None);
}

#[test]
fn distinct_counts_ignore_missing_ids() {
    let records = [
        OrderRecord::delivered("a").with_product("p1"),
        OrderRecord::delivered("a").with_product("p2"),
        OrderRecord::new("b", "shipped").with_product("p1"),
        OrderRecord::default(),
    ];
    assert_eq!(distinct_products(&records), 2);
    assert_eq!(distinct_delivered_orders(&records), 1);
}

#[test]
fn loose_json_fields_are_coerced() {
    let raw = r#"[{
        "order_id": 42,
        "order_status": "delivered",
        "customer_state": "sp",
        "seller_state": "ZZ",
        "payment_value": "129.90",
        "freight_value": "n/a",
        "order_purchase_timestamp": "2024-01-01 10:00:00",
        "order_delivered_customer_date": "2024-01-04T09:00:00Z"
    }]"#;
    let store = DatasetStore::from_json_str(raw).expect("parse records");
    let record = &store.records()[0];
    assert_eq!(record.order_id.as_deref(), Some("42"));
    assert_eq!(record.customer_state, Some(StateCode::SP));
    assert_eq!(record.seller_state, None);
    assert_eq!(record.payment_value, Some(Decimal::new(12990, 2)));
    assert_eq!(record.freight_value, None);
    assert_eq!(record.delivery_days(), Some(3));
}

#[test]
fn non_array_payload_is_invalid_data() {
    let err = DatasetStore::from_json_str(r#"{"order_id": "a"}"#).expect_err("object payload");
    assert!(err.to_string().contains("failed to parse order records"));
}
