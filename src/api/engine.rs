use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DatasetStore, GeographyBoundaries, OrderRecord, StateCode};
use crate::error::{DashboardError, DashboardResult};
use crate::extensions::{AggregateKey, ViewConsumer};
use crate::filter::FilterState;

use super::{ControlState, DashboardAggregates, DashboardConfig, SortState};

/// Where the engine stands in its one-shot bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Lifecycle {
    Uninitialized,
    Ready,
    /// The dataset loaded but held no records; nothing is rendered.
    NoData,
    /// A source failed. Initialization is not retried.
    Failed(String),
}

pub(super) struct LoadedDataset {
    pub(super) store: DatasetStore,
    pub(super) boundaries: GeographyBoundaries,
    pub(super) state_options: Vec<StateCode>,
}

pub(super) struct RegisteredConsumer {
    pub(super) consumer: Box<dyn ViewConsumer>,
    /// `None` subscribes to every key.
    pub(super) interests: Option<SmallVec<[AggregateKey; 4]>>,
}

impl RegisteredConsumer {
    pub(super) fn wants(&self, key: AggregateKey) -> bool {
        self.interests
            .as_ref()
            .is_none_or(|interests| interests.contains(&key))
    }
}

/// Dashboard facade consumed by host applications.
///
/// `DashboardEngine` owns the dataset store, the filter state, the ranking
/// sort state and the consumer registry. Every filter or sort action
/// recomputes the aggregates over the visible subset and pushes them to the
/// registered consumers.
pub struct DashboardEngine {
    pub(super) config: DashboardConfig,
    pub(super) lifecycle: Lifecycle,
    pub(super) init_started: bool,
    pub(super) loaded: Option<LoadedDataset>,
    pub(super) filter: FilterState,
    pub(super) sort: SortState,
    pub(super) consumers: Vec<RegisteredConsumer>,
    pub(super) aggregates: Option<DashboardAggregates>,
    pub(super) controls: Option<ControlState>,
    pub(super) revision: u64,
}

impl DashboardEngine {
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Aggregates from the latest recompute.
    #[must_use]
    pub fn aggregates(&self) -> Option<&DashboardAggregates> {
        self.aggregates.as_ref()
    }

    #[must_use]
    pub fn controls(&self) -> Option<&ControlState> {
        self.controls.as_ref()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.loaded.as_ref().map_or(0, |loaded| loaded.store.len())
    }

    #[must_use]
    pub fn visible_records(&self) -> usize {
        self.aggregates
            .as_ref()
            .map_or(0, |aggregates| aggregates.visible_records)
    }

    /// Records passing the current filter.
    pub fn visible_subset(&self) -> DashboardResult<Vec<&OrderRecord>> {
        let loaded = self.loaded_dataset()?;
        let variant = self.config.variant;
        let filter = &self.filter;
        Ok(loaded
            .store
            .select(|record| filter.matches(record, variant)))
    }

    pub(super) fn loaded_dataset(&self) -> DashboardResult<&LoadedDataset> {
        match (&self.lifecycle, &self.loaded) {
            (Lifecycle::Ready, Some(loaded)) => Ok(loaded),
            _ => Err(DashboardError::NotInitialized),
        }
    }
}
