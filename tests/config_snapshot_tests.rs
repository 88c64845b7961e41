use rust_decimal::Decimal;
use salesdash::api::{
    DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardConfig, DashboardEngine, DashboardSnapshot,
};
use salesdash::core::{
    DashboardVariant, DatasetStore, GeographyBoundaries, OrderRecord, RevenueBasis, SortDirection,
    StateCode,
};

#[test]
fn config_defaults_fill_missing_fields() {
    let config = DashboardConfig::from_json_str(r#"{"variant": "seller"}"#).expect("parse config");
    assert_eq!(config.variant, DashboardVariant::Seller);
    assert_eq!(config.top_n, 5);
    assert_eq!(config.segment_sort, SortDirection::Descending);
    assert_eq!(config.title_prefix, "Sales Dashboard");
    assert_eq!(config.effective_revenue_basis(), RevenueBasis::NetOfFreight);
}

#[test]
fn config_round_trips_through_json() {
    let config = DashboardConfig::new(DashboardVariant::Product)
        .with_top_n(3)
        .with_geography_sort(SortDirection::Ascending)
        .with_revenue_basis(RevenueBasis::NetOfFreight)
        .with_title_prefix("Olist");
    let json = config.to_json_pretty().expect("serialize config");
    let back = DashboardConfig::from_json_str(&json).expect("parse config");
    assert_eq!(back, config);
}

#[test]
fn invalid_config_values_are_rejected() {
    assert!(DashboardConfig::from_json_str(r#"{"top_n": 0}"#).is_err());
    assert!(DashboardConfig::from_json_str(r#"{"title_prefix": "  "}"#).is_err());
    assert!(DashboardConfig::from_json_str(r#"{"variant": "warehouse"}"#).is_err());
}

fn engine() -> DashboardEngine {
    let records = vec![
        OrderRecord::delivered("a")
            .with_customer_state(StateCode::PR)
            .with_category("toys")
            .with_payment(Decimal::new(1999, 2)),
        OrderRecord::delivered("b")
            .with_customer_state(StateCode::SC)
            .with_category("garden_tools")
            .with_payment(Decimal::new(500, 2)),
    ];
    DashboardEngine::with_dataset(
        DashboardConfig::default().with_top_n(1),
        DatasetStore::new(records),
        GeographyBoundaries::from_state_names(),
    )
    .expect("engine init")
}

#[test]
fn snapshot_reflects_filter_and_controls() {
    let mut engine = engine();
    engine
        .select_segment(Some("garden_tools"))
        .expect("select segment");
    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(snapshot.visible_records, 1);
    assert_eq!(snapshot.total_records, 2);
    assert_eq!(snapshot.filter.segment(), Some("garden_tools"));
    assert_eq!(snapshot.controls.title, "Sales Dashboard: Garden Tools");
    assert_eq!(snapshot.aggregates.total_revenue, Decimal::new(500, 2));
    assert_eq!(snapshot.aggregates.segment_ranking.len(), 1);
}

#[test]
fn snapshot_contract_v1_parses_back() {
    let engine = engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("contract json");
    assert!(json.contains("\"schema_version\": 1"));
    let parsed = DashboardSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, engine.snapshot().expect("snapshot"));

    let bare = parsed.to_json_pretty().expect("bare json");
    let parsed_bare = DashboardSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed_bare, parsed);
}

#[test]
fn unknown_snapshot_schema_is_rejected() {
    let engine = engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("contract json")
        .replace(
            &format!("\"schema_version\": {DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1}"),
            "\"schema_version\": 99",
        );
    let err = DashboardSnapshot::from_json_compat_str(&json).expect_err("unsupported version");
    assert!(err.to_string().contains("unsupported snapshot schema version"));
}
