use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    DashboardVariant, GeographyBoundaries, OrderRecord, RevenueBasis, Rollup, StateCode,
    decimal_to_f64, delivery_by_state, revenue_by_state, reviews_by_state, sellers_by_state,
    top_by_metric,
};

/// One state plus the metric that earned it a map-stats slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateMetric<V> {
    pub state: StateCode,
    pub value: V,
}

/// Headline states shown beside the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapStats {
    pub top_revenue: Option<StateMetric<Decimal>>,
    pub fastest_delivery: Option<StateMetric<f64>>,
    pub highest_satisfaction: Option<StateMetric<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "position", rename_all = "snake_case")]
pub enum RegionHighlight {
    Selected,
    Dimmed,
    /// Normalized colour-scale position in `[0, 1]`.
    Scaled(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Boundary name as published by the geography source.
    pub name: String,
    pub code: Option<StateCode>,
    pub revenue: Decimal,
    pub sellers: usize,
    pub delivery_days: Option<f64>,
    pub review: Option<f64>,
    pub highlight: RegionHighlight,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapView {
    pub selected: Option<StateCode>,
    /// `(min, max)` of revenue over states with data.
    pub color_domain: Option<(f64, f64)>,
    pub regions: Vec<MapRegion>,
}

impl MapView {
    #[must_use]
    pub fn region(&self, code: StateCode) -> Option<&MapRegion> {
        self.regions.iter().find(|region| region.code == Some(code))
    }
}

/// Per-state rollups backing the map and its stats.
pub(crate) struct StateRollups {
    revenue: Rollup<StateCode, Decimal>,
    delivery: Rollup<StateCode, f64>,
    reviews: Rollup<StateCode, f64>,
    sellers: Rollup<StateCode, usize>,
}

impl StateRollups {
    pub(crate) fn compute(
        records: &[&OrderRecord],
        variant: DashboardVariant,
        basis: RevenueBasis,
    ) -> Self {
        Self {
            revenue: revenue_by_state(records, variant, basis),
            delivery: delivery_by_state(records, variant),
            reviews: reviews_by_state(records, variant),
            sellers: sellers_by_state(records, variant),
        }
    }

    pub(crate) fn revenue(&self) -> &Rollup<StateCode, Decimal> {
        &self.revenue
    }

    pub(crate) fn stats(&self) -> MapStats {
        let top_revenue = top_by_metric(&self.revenue, Decimal::cmp)
            .map(|(state, value)| StateMetric {
                state: *state,
                value: *value,
            });
        // Fastest delivery is the smallest mean, hence the reversed comparator.
        let fastest_delivery = top_by_metric(&self.delivery, |a, b| {
            OrderedFloat(*b).cmp(&OrderedFloat(*a))
        })
        .map(|(state, value)| StateMetric {
            state: *state,
            value: *value,
        });
        let highest_satisfaction =
            top_by_metric(&self.reviews, |a, b| OrderedFloat(*a).cmp(&OrderedFloat(*b))).map(
                |(state, value)| StateMetric {
                    state: *state,
                    value: *value,
                },
            );
        MapStats {
            top_revenue,
            fastest_delivery,
            highest_satisfaction,
        }
    }

    fn color_metric(&self, state: StateCode) -> Option<f64> {
        self.revenue.get(&state).copied().map(decimal_to_f64)
    }

    fn color_domain(&self) -> Option<(f64, f64)> {
        let min = self.revenue.values().copied().map(decimal_to_f64).map(OrderedFloat).min()?;
        let max = self.revenue.values().copied().map(decimal_to_f64).map(OrderedFloat).max()?;
        Some((min.0, max.0))
    }

    pub(crate) fn map_view(
        &self,
        boundaries: &GeographyBoundaries,
        selected: Option<StateCode>,
    ) -> MapView {
        let color_domain = self.color_domain();
        let regions = boundaries
            .resolved_regions()
            .map(|(name, code)| {
                let highlight = match selected {
                    Some(selected) if code == Some(selected) => RegionHighlight::Selected,
                    Some(_) => RegionHighlight::Dimmed,
                    None => {
                        let value = code
                            .and_then(|code| self.color_metric(code))
                            .unwrap_or(0.0);
                        RegionHighlight::Scaled(scale_position(value, color_domain))
                    }
                };
                MapRegion {
                    name: name.to_owned(),
                    code,
                    revenue: code
                        .and_then(|code| self.revenue.get(&code).copied())
                        .unwrap_or(Decimal::ZERO),
                    sellers: code
                        .and_then(|code| self.sellers.get(&code).copied())
                        .unwrap_or(0),
                    delivery_days: code.and_then(|code| self.delivery.get(&code).copied()),
                    review: code.and_then(|code| self.reviews.get(&code).copied()),
                    highlight,
                }
            })
            .collect();

        MapView {
            selected,
            color_domain,
            regions,
        }
    }
}

/// Linear position of `value` inside `domain`, clamped to `[0, 1]`.
///
/// A missing or zero-width domain maps everything to the midpoint.
#[must_use]
pub fn scale_position(value: f64, domain: Option<(f64, f64)>) -> f64 {
    let Some((min, max)) = domain else {
        return 0.5;
    };
    let span = max - min;
    if !span.is_finite() || span.partial_cmp(&0.0) != Some(Ordering::Greater) {
        return 0.5;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}
