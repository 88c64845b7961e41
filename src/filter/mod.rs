//! Filter state machine.
//!
//! The dashboard filters on one dimension at a time. Every transition is a
//! pure function of the previous state and an action; selecting a value on one
//! dimension clears the other two.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{DashboardVariant, OrderRecord, StateCode, WeekdaySelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Geography,
    /// Product category or seller id, depending on the dashboard variant.
    Segment,
    Weekday,
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Geography => "geography",
            Self::Segment => "segment",
            Self::Weekday => "weekday",
        })
    }
}

/// User filter action. `None` payloads clear the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum FilterAction {
    SelectGeography(Option<StateCode>),
    SelectSegment(Option<String>),
    SelectWeekday(Option<WeekdaySelector>),
    ResetAll,
}

impl FilterAction {
    /// Dimension the action targets; `None` for a full reset.
    #[must_use]
    pub fn dimension(&self) -> Option<FilterDimension> {
        match self {
            Self::SelectGeography(_) => Some(FilterDimension::Geography),
            Self::SelectSegment(_) => Some(FilterDimension::Segment),
            Self::SelectWeekday(_) => Some(FilterDimension::Weekday),
            Self::ResetAll => None,
        }
    }
}

/// Currently active filters. At most one dimension is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "FilterStateRepr")]
pub struct FilterState {
    geography: Option<StateCode>,
    segment: Option<String>,
    weekday: Option<WeekdaySelector>,
}

#[derive(Deserialize)]
struct FilterStateRepr {
    #[serde(default)]
    geography: Option<StateCode>,
    #[serde(default)]
    segment: Option<String>,
    #[serde(default)]
    weekday: Option<WeekdaySelector>,
}

impl TryFrom<FilterStateRepr> for FilterState {
    type Error = String;

    fn try_from(repr: FilterStateRepr) -> Result<Self, Self::Error> {
        let active = usize::from(repr.geography.is_some())
            + usize::from(repr.segment.is_some())
            + usize::from(repr.weekday.is_some());
        if active > 1 {
            return Err(format!(
                "filter state may set at most one dimension, found {active}"
            ));
        }
        Ok(Self {
            geography: repr.geography,
            segment: repr.segment,
            weekday: repr.weekday,
        })
    }
}

impl FilterState {
    /// State with every dimension cleared: the full-dataset view.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn geography(&self) -> Option<StateCode> {
        self.geography
    }

    #[must_use]
    pub fn segment(&self) -> Option<&str> {
        self.segment.as_deref()
    }

    #[must_use]
    pub fn weekday(&self) -> Option<WeekdaySelector> {
        self.weekday
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.active_dimension().is_none()
    }

    #[must_use]
    pub fn active_dimension(&self) -> Option<FilterDimension> {
        if self.geography.is_some() {
            Some(FilterDimension::Geography)
        } else if self.segment.is_some() {
            Some(FilterDimension::Segment)
        } else if self.weekday.is_some() {
            Some(FilterDimension::Weekday)
        } else {
            None
        }
    }

    /// Applies `action` and returns the resulting state.
    #[must_use]
    pub fn apply(&self, action: FilterAction) -> Self {
        next_state(self, action)
    }

    /// Whether `record` belongs to the visible subset under this state.
    #[must_use]
    pub fn matches(&self, record: &OrderRecord, variant: DashboardVariant) -> bool {
        if let Some(state) = self.geography {
            return variant.geography_of(record) == Some(state);
        }
        if let Some(segment) = self.segment.as_deref() {
            return variant.segment_of(record) == Some(segment);
        }
        if let Some(selector) = self.weekday {
            return record
                .purchase_weekday()
                .is_some_and(|day| selector.matches(day));
        }
        true
    }
}

/// Pure transition function.
///
/// Any selection first clears all three dimensions, then applies its value.
/// `ResetAll` yields the cleared state regardless of `current`.
#[must_use]
pub fn next_state(_current: &FilterState, action: FilterAction) -> FilterState {
    let cleared = FilterState::cleared();
    match action {
        FilterAction::SelectGeography(geography) => FilterState {
            geography,
            ..cleared
        },
        FilterAction::SelectSegment(segment) => FilterState {
            segment: segment.filter(|value| !value.is_empty()),
            ..cleared
        },
        FilterAction::SelectWeekday(weekday) => FilterState { weekday, ..cleared },
        FilterAction::ResetAll => cleared,
    }
}
