mod aggregates;
mod consumer_dispatch;
mod consumer_registry;
mod controls;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod filter_controller;
mod json_contract;
mod map_view;
mod sort_controller;

pub use aggregates::{DashboardAggregates, GeographyRanking, SortState, SortTarget};
pub use controls::{ControlState, dashboard_title, state_options};
pub use engine::{DashboardEngine, Lifecycle};
pub use engine_config::{DEFAULT_TITLE_PREFIX, DashboardConfig};
pub use engine_init::{
    DATASET_SOURCE_NAME, DatasetSource, GEOGRAPHY_SOURCE_NAME, GeographySource, InitOutcome,
};
pub use engine_snapshot::DashboardSnapshot;
pub use json_contract::{DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshotJsonContractV1};
pub use map_view::{MapRegion, MapStats, MapView, RegionHighlight, StateMetric, scale_position};
