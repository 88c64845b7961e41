use tracing::{debug, trace};

use crate::error::DashboardResult;
use crate::extensions::{AggregateKey, AggregateValue, ConsumerContext, control_value};

use super::aggregates::AggregateInputs;
use super::{ControlState, DashboardAggregates, DashboardEngine};

impl DashboardEngine {
    pub(super) fn consumer_context(&self) -> ConsumerContext {
        ConsumerContext {
            variant: self.config.variant,
            filter: self.filter.clone(),
            visible_records: self.visible_records(),
            total_records: self.total_records(),
            revision: self.revision,
        }
    }

    /// Recomputes every aggregate and control over the visible subset.
    pub(super) fn recompute(&mut self) -> DashboardResult<()> {
        let loaded = self.loaded_dataset()?;
        let variant = self.config.variant;
        let inputs = AggregateInputs {
            variant,
            basis: self.config.effective_revenue_basis(),
            top_n: self.config.top_n,
            sort: self.sort,
            boundaries: &loaded.boundaries,
            selected: self.filter.geography(),
        };
        let visible = self.visible_subset()?;
        let aggregates = DashboardAggregates::compute(&visible, &inputs);
        let controls = ControlState::derive(
            &self.filter,
            variant,
            &self.config.title_prefix,
            &loaded.state_options,
        );
        debug!(
            visible = aggregates.visible_records,
            total = loaded.store.len(),
            title = %controls.title,
            "dashboard recomputed"
        );
        self.aggregates = Some(aggregates);
        self.controls = Some(controls);
        self.revision += 1;
        Ok(())
    }

    pub(super) fn recompute_and_dispatch(&mut self) -> DashboardResult<()> {
        self.recompute()?;
        self.dispatch_keys(AggregateKey::published_by(self.config.variant));
        Ok(())
    }

    fn current_value(&self, key: AggregateKey) -> Option<AggregateValue> {
        if key.is_control() {
            return self
                .controls
                .as_ref()
                .and_then(|controls| control_value(key, controls));
        }
        self.aggregates
            .as_ref()
            .and_then(|aggregates| aggregates.value_for(key))
    }

    /// Pushes the latest values for `keys` to every interested consumer.
    ///
    /// Keys nobody listens to are skipped without building their payload.
    pub(super) fn dispatch_keys(&mut self, keys: &[AggregateKey]) {
        let context = self.consumer_context();
        for &key in keys {
            if !self.consumers.iter().any(|entry| entry.wants(key)) {
                trace!(key = %key, "no consumer registered for key, skipping");
                continue;
            }
            let Some(value) = self.current_value(key) else {
                trace!(key = %key, "no value available for key, skipping");
                continue;
            };
            for entry in &mut self.consumers {
                if entry.wants(key) {
                    entry.consumer.update(key, &value, &context);
                }
            }
        }
    }

    /// Replays the current values to one consumer.
    pub(super) fn dispatch_to(&mut self, index: usize) {
        if self.aggregates.is_none() {
            return;
        }
        let context = self.consumer_context();
        for &key in AggregateKey::published_by(self.config.variant) {
            let wanted = self
                .consumers
                .get(index)
                .is_some_and(|entry| entry.wants(key));
            if !wanted {
                continue;
            }
            let Some(value) = self.current_value(key) else {
                continue;
            };
            if let Some(entry) = self.consumers.get_mut(index) {
                entry.consumer.update(key, &value, &context);
            }
        }
    }
}
