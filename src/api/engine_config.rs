use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_TOP_N, DashboardVariant, RevenueBasis, SortDirection};
use crate::error::{DashboardError, DashboardResult};

pub const DEFAULT_TITLE_PREFIX: &str = "Sales Dashboard";

/// Public dashboard bootstrap configuration.
///
/// Serializable so hosts can keep page setup in a JSON file next to the
/// dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub variant: DashboardVariant,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub segment_sort: SortDirection,
    #[serde(default)]
    pub geography_sort: SortDirection,
    /// Overrides the variant's revenue basis when set.
    #[serde(default)]
    pub revenue_basis: Option<RevenueBasis>,
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DashboardVariant::default())
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn new(variant: DashboardVariant) -> Self {
        Self {
            variant,
            top_n: default_top_n(),
            segment_sort: SortDirection::default(),
            geography_sort: SortDirection::default(),
            revenue_basis: None,
            title_prefix: default_title_prefix(),
        }
    }

    /// Number of bars kept by ranking charts.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_segment_sort(mut self, direction: SortDirection) -> Self {
        self.segment_sort = direction;
        self
    }

    #[must_use]
    pub fn with_geography_sort(mut self, direction: SortDirection) -> Self {
        self.geography_sort = direction;
        self
    }

    #[must_use]
    pub fn with_revenue_basis(mut self, basis: RevenueBasis) -> Self {
        self.revenue_basis = Some(basis);
        self
    }

    #[must_use]
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }

    /// Revenue basis in effect: the override, else the variant default.
    #[must_use]
    pub fn effective_revenue_basis(&self) -> RevenueBasis {
        self.revenue_basis
            .unwrap_or_else(|| self.variant.default_revenue_basis())
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.top_n == 0 {
            return Err(DashboardError::InvalidConfig(
                "top_n must be greater than zero".to_owned(),
            ));
        }
        if self.title_prefix.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "title prefix must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::InvalidConfig(format!("failed to serialize config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_title_prefix() -> String {
    DEFAULT_TITLE_PREFIX.to_owned()
}
