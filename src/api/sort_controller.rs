use tracing::debug;

use crate::core::SortDirection;
use crate::error::DashboardResult;

use super::{DashboardEngine, SortTarget};

impl DashboardEngine {
    /// Re-sorts one ranking chart over the current visible subset.
    ///
    /// Only the affected ranking is dispatched.
    pub fn change_sort(&mut self, target: SortTarget, direction: SortDirection) -> DashboardResult<()> {
        self.loaded_dataset()?;
        match target {
            SortTarget::Segment => self.sort.segment = direction,
            SortTarget::Geography => self.sort.geography = direction,
        }
        debug!(?target, %direction, "ranking sort changed");
        self.recompute()?;
        self.dispatch_keys(&[target.aggregate_key()]);
        Ok(())
    }

    /// Reads a sort dropdown label; unknown labels mean descending.
    pub fn change_sort_label(&mut self, target: SortTarget, label: &str) -> DashboardResult<()> {
        self.change_sort(target, SortDirection::from_label(label))
    }
}
