use serde::{Deserialize, Serialize};

use crate::core::DashboardVariant;
use crate::error::{DashboardError, DashboardResult};
use crate::filter::FilterState;

use super::{ControlState, DashboardAggregates, DashboardEngine, SortState};

/// Serializable deterministic dashboard state used by regression tests and
/// host-side persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub variant: DashboardVariant,
    pub revision: u64,
    pub filter: FilterState,
    pub sort: SortState,
    pub total_records: usize,
    pub visible_records: usize,
    pub aggregates: DashboardAggregates,
    pub controls: ControlState,
}

impl DashboardEngine {
    pub fn snapshot(&self) -> DashboardResult<DashboardSnapshot> {
        self.loaded_dataset()?;
        let (Some(aggregates), Some(controls)) = (&self.aggregates, &self.controls) else {
            return Err(DashboardError::NotInitialized);
        };
        Ok(DashboardSnapshot {
            variant: self.config.variant,
            revision: self.revision,
            filter: self.filter.clone(),
            sort: self.sort,
            total_records: self.total_records(),
            visible_records: aggregates.visible_records,
            aggregates: aggregates.clone(),
            controls: controls.clone(),
        })
    }
}
