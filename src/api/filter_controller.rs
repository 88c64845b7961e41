use tracing::{debug, warn};

use crate::core::{StateCode, WeekdaySelector};
use crate::error::{DashboardError, DashboardResult};
use crate::filter::{FilterAction, FilterState, next_state};

use super::DashboardEngine;

impl DashboardEngine {
    /// Applies a filter action, recomputes, and dispatches.
    ///
    /// Returns the new filter state. Fails with `NotInitialized` before the
    /// dashboard is ready, leaving the filter untouched.
    pub fn apply_action(&mut self, action: FilterAction) -> DashboardResult<&FilterState> {
        self.loaded_dataset()?;
        let previous = self.filter.active_dimension();
        self.filter = next_state(&self.filter, action.clone());
        debug!(
            ?action,
            from = ?previous,
            to = ?self.filter.active_dimension(),
            "filter transition"
        );
        self.recompute_and_dispatch()?;
        Ok(&self.filter)
    }

    pub fn select_geography(&mut self, state: Option<StateCode>) -> DashboardResult<&FilterState> {
        self.apply_action(FilterAction::SelectGeography(state))
    }

    /// Selects a geography from a dropdown value: `""` clears the filter.
    pub fn select_geography_code(&mut self, code: &str) -> DashboardResult<&FilterState> {
        let code = code.trim();
        if code.is_empty() {
            return self.select_geography(None);
        }
        let state = StateCode::from_code(code)
            .ok_or_else(|| DashboardError::InvalidData(format!("unknown state code `{code}`")))?;
        self.select_geography(Some(state))
    }

    /// Selects the state behind a clicked map region.
    ///
    /// Names outside the state table clear the geography filter.
    pub fn select_region(&mut self, region_name: &str) -> DashboardResult<&FilterState> {
        let state = StateCode::from_name(region_name);
        if state.is_none() {
            warn!(region = region_name, "unresolved region name, clearing geography filter");
        }
        self.select_geography(state)
    }

    pub fn select_segment(&mut self, segment: Option<&str>) -> DashboardResult<&FilterState> {
        self.apply_action(FilterAction::SelectSegment(segment.map(str::to_owned)))
    }

    pub fn select_weekday(
        &mut self,
        selector: Option<WeekdaySelector>,
    ) -> DashboardResult<&FilterState> {
        self.apply_action(FilterAction::SelectWeekday(selector))
    }

    /// Selects a weekday from a dropdown label such as `"weekends"`,
    /// `"monday"` or `"all-weeks"`.
    pub fn select_weekday_label(&mut self, label: &str) -> DashboardResult<&FilterState> {
        let selector = WeekdaySelector::parse_option(label)?;
        self.select_weekday(selector)
    }

    pub fn reset_all(&mut self) -> DashboardResult<&FilterState> {
        self.apply_action(FilterAction::ResetAll)
    }
}
