use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::rollup::Rollup;

/// Default number of bars in ranking charts.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Reads a dropdown label. Anything other than `"ascending"` (any case)
    /// falls back to descending.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("ascending") {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<K, V> {
    pub key: K,
    pub value: V,
    /// Whether the value label is drawn inside the bar: the longest bar when
    /// descending, the shortest when ascending.
    pub label_inside: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking<K, V> {
    pub direction: SortDirection,
    pub entries: Vec<RankedEntry<K, V>>,
}

impl<K, V> Ranking<K, V> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable-sorts a rollup copy by value and keeps the first `top_n` entries.
///
/// Incomparable values (NaN) compare equal and keep their rollup order.
#[must_use]
pub fn sort_and_truncate<K, V>(
    rollup: &Rollup<K, V>,
    direction: SortDirection,
    top_n: usize,
) -> Ranking<K, V>
where
    K: Clone,
    V: PartialOrd + Copy,
{
    let mut sorted: Vec<(K, V)> = rollup
        .iter()
        .map(|(key, value)| (key.clone(), *value))
        .collect();
    sorted.sort_by(|a, b| direction.apply(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)));
    sorted.truncate(top_n);

    let edge = match direction {
        SortDirection::Descending => extreme(&sorted, Ordering::Greater),
        SortDirection::Ascending => extreme(&sorted, Ordering::Less),
    };

    let entries = sorted
        .into_iter()
        .map(|(key, value)| RankedEntry {
            label_inside: edge.is_some_and(|edge| value.partial_cmp(&edge) == Some(Ordering::Equal)),
            key,
            value,
        })
        .collect();

    Ranking { direction, entries }
}

fn extreme<K, V: PartialOrd + Copy>(entries: &[(K, V)], wanted: Ordering) -> Option<V> {
    entries.iter().map(|(_, value)| *value).reduce(|best, value| {
        if value.partial_cmp(&best) == Some(wanted) {
            value
        } else {
            best
        }
    })
}
