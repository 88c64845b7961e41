use serde::{Deserialize, Serialize};

use crate::core::{
    ALL_WEEKS_LABEL, DashboardVariant, DatasetStore, StateCode, WeekdaySelector,
    format_category_name,
};
use crate::filter::{FilterDimension, FilterState};

/// Filter-mirroring controls: page title plus both dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub title: String,
    /// Selected state code; `None` renders as the empty "all states" entry.
    pub state_selection: Option<StateCode>,
    pub state_options: Vec<StateCode>,
    /// `all-weeks` or the lowercase selector label.
    pub weekday_selection: String,
    pub weekday_options: Vec<String>,
}

impl ControlState {
    /// Derives every control from the filter state alone.
    #[must_use]
    pub fn derive(
        filter: &FilterState,
        variant: DashboardVariant,
        title_prefix: &str,
        state_options: &[StateCode],
    ) -> Self {
        Self {
            title: dashboard_title(filter, variant, title_prefix),
            state_selection: filter.geography(),
            state_options: state_options.to_vec(),
            weekday_selection: filter
                .weekday()
                .map_or(ALL_WEEKS_LABEL, WeekdaySelector::label)
                .to_owned(),
            weekday_options: weekday_options(),
        }
    }

    /// State dropdown value as a string: `""` or the state code.
    #[must_use]
    pub fn state_dropdown_value(&self) -> &str {
        self.state_selection.map_or("", StateCode::code)
    }
}

#[must_use]
pub fn dashboard_title(filter: &FilterState, variant: DashboardVariant, prefix: &str) -> String {
    let fragment = match filter.active_dimension() {
        None => return prefix.to_owned(),
        Some(FilterDimension::Geography) => filter
            .geography()
            .map(|state| state.name().to_owned())
            .unwrap_or_default(),
        Some(FilterDimension::Segment) => match variant {
            DashboardVariant::Product => format_category_name(filter.segment()),
            DashboardVariant::Seller => {
                format!("Seller {}", filter.segment().unwrap_or_default())
            }
        },
        Some(FilterDimension::Weekday) => filter
            .weekday()
            .map(WeekdaySelector::title_fragment)
            .unwrap_or_default(),
    };
    format!("{prefix}: {fragment}")
}

/// Sorted distinct geography codes present in the full dataset.
#[must_use]
pub fn state_options(store: &DatasetStore, variant: DashboardVariant) -> Vec<StateCode> {
    let mut options: Vec<StateCode> = store
        .records()
        .iter()
        .filter_map(|record| variant.geography_of(record))
        .collect();
    options.sort_unstable_by_key(|state| state.code());
    options.dedup();
    options
}

fn weekday_options() -> Vec<String> {
    use chrono::Weekday;

    let mut options = vec![
        ALL_WEEKS_LABEL.to_owned(),
        WeekdaySelector::Weekdays.label().to_owned(),
        WeekdaySelector::Weekends.label().to_owned(),
    ];
    options.extend(
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(|day| WeekdaySelector::Day(day).label().to_owned()),
    );
    options
}
