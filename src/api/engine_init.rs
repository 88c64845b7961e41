use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::core::{DatasetStore, GeographyBoundaries, OrderRecord};
use crate::error::{DashboardError, DashboardResult};
use crate::filter::FilterState;

use super::controls::state_options;
use super::engine::LoadedDataset;
use super::{DashboardConfig, DashboardEngine, Lifecycle, SortState};

pub const DATASET_SOURCE_NAME: &str = "dataset";
pub const GEOGRAPHY_SOURCE_NAME: &str = "geography";

/// Result of an initialization attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitOutcome {
    /// Both sources loaded; the first recompute has been dispatched.
    Ready,
    /// The dataset was empty; a warning is logged and nothing is rendered.
    NoData,
    /// Initialization already ran; the call was ignored.
    AlreadyInitialized,
}

/// Supplies the order records.
pub trait DatasetSource {
    fn load_records(&self) -> DashboardResult<Vec<OrderRecord>>;
}

/// Supplies the per-state boundary shapes.
pub trait GeographySource {
    fn load_boundaries(&self) -> DashboardResult<GeographyBoundaries>;
}

impl<F> DatasetSource for F
where
    F: Fn() -> DashboardResult<Vec<OrderRecord>>,
{
    fn load_records(&self) -> DashboardResult<Vec<OrderRecord>> {
        self()
    }
}

impl<F> GeographySource for F
where
    F: Fn() -> DashboardResult<GeographyBoundaries>,
{
    fn load_boundaries(&self) -> DashboardResult<GeographyBoundaries> {
        self()
    }
}

impl DashboardEngine {
    /// Creates an engine waiting for its one-shot initialization.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let sort = SortState {
            segment: config.segment_sort,
            geography: config.geography_sort,
        };
        debug!(variant = ?config.variant, top_n = config.top_n, "dashboard engine created");
        Ok(Self {
            config,
            lifecycle: Lifecycle::Uninitialized,
            init_started: false,
            loaded: None,
            filter: FilterState::cleared(),
            sort,
            consumers: Vec::new(),
            aggregates: None,
            controls: None,
            revision: 0,
        })
    }

    /// Creates an engine around an already loaded store.
    ///
    /// Equivalent to [`DashboardEngine::new`] followed by a successful
    /// [`DashboardEngine::initialize`]; an empty store leaves the engine in
    /// [`Lifecycle::NoData`].
    pub fn with_dataset(
        config: DashboardConfig,
        store: DatasetStore,
        boundaries: GeographyBoundaries,
    ) -> DashboardResult<Self> {
        let mut engine = Self::new(config)?;
        engine.init_started = true;
        if store.is_empty() {
            engine.mark_no_data();
        } else {
            engine.install(store, boundaries)?;
        }
        Ok(engine)
    }

    /// Joins the two load results and performs the first render.
    ///
    /// Runs at most once: the guard is taken before either result is looked
    /// at, so a failed attempt is reported once and never retried.
    pub fn initialize(
        &mut self,
        dataset: DashboardResult<Vec<OrderRecord>>,
        geography: DashboardResult<GeographyBoundaries>,
    ) -> DashboardResult<InitOutcome> {
        if self.init_started {
            warn!("dashboard already initialized, ignoring repeated initialization");
            return Ok(InitOutcome::AlreadyInitialized);
        }
        self.init_started = true;

        let records = dataset.map_err(|e| self.fail(DATASET_SOURCE_NAME, &e))?;
        let boundaries = geography.map_err(|e| self.fail(GEOGRAPHY_SOURCE_NAME, &e))?;

        if records.is_empty() {
            self.mark_no_data();
            return Ok(InitOutcome::NoData);
        }

        self.install(DatasetStore::new(records), boundaries)?;
        Ok(InitOutcome::Ready)
    }

    /// Pulls both sources and hands the results to [`DashboardEngine::initialize`].
    ///
    /// Sources are not touched when initialization already ran.
    pub fn initialize_from<D, G>(&mut self, dataset: &D, geography: &G) -> DashboardResult<InitOutcome>
    where
        D: DatasetSource + ?Sized,
        G: GeographySource + ?Sized,
    {
        if self.init_started {
            warn!("dashboard already initialized, sources not reloaded");
            return Ok(InitOutcome::AlreadyInitialized);
        }
        let records = dataset.load_records();
        let boundaries = geography.load_boundaries();
        self.initialize(records, boundaries)
    }

    fn install(
        &mut self,
        store: DatasetStore,
        boundaries: GeographyBoundaries,
    ) -> DashboardResult<()> {
        let state_options = state_options(&store, self.config.variant);
        info!(
            records = store.len(),
            regions = boundaries.len(),
            states = state_options.len(),
            "dashboard initialized"
        );
        self.loaded = Some(LoadedDataset {
            store,
            boundaries,
            state_options,
        });
        self.lifecycle = Lifecycle::Ready;
        self.recompute_and_dispatch()
    }

    fn mark_no_data(&mut self) {
        warn!("dataset loaded without records, dashboard stays unrendered");
        self.lifecycle = Lifecycle::NoData;
    }

    fn fail(&mut self, source_name: &str, cause: &DashboardError) -> DashboardError {
        let reason = cause.to_string();
        error!(source = source_name, %reason, "dashboard initialization failed");
        self.lifecycle = Lifecycle::Failed(format!("{source_name}: {reason}"));
        DashboardError::Initialization {
            source_name: source_name.to_owned(),
            reason,
        }
    }
}
