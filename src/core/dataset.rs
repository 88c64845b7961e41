use std::sync::Arc;

use tracing::debug;

use crate::error::{DashboardError, DashboardResult};

use super::types::OrderRecord;

/// Immutable record collection, populated once at startup.
///
/// Cloning is cheap; every clone shares the same records.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Arc<[OrderRecord]>,
}

impl DatasetStore {
    #[must_use]
    pub fn new(records: Vec<OrderRecord>) -> Self {
        debug!(count = records.len(), "dataset store populated");
        Self {
            records: records.into(),
        }
    }

    /// Loads a JSON array of loosely typed records.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let records: Vec<OrderRecord> = serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse order records: {e}"))
        })?;
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records accepted by `predicate`, preserving dataset order.
    #[must_use]
    pub fn select<P>(&self, predicate: P) -> Vec<&OrderRecord>
    where
        P: Fn(&OrderRecord) -> bool + Sync,
    {
        #[cfg(feature = "parallel-filter")]
        {
            use rayon::prelude::*;

            self.records
                .par_iter()
                .filter(|record| predicate(record))
                .collect()
        }

        #[cfg(not(feature = "parallel-filter"))]
        {
            self.records
                .iter()
                .filter(|record| predicate(record))
                .collect()
        }
    }
}
