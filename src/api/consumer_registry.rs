use smallvec::SmallVec;
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::extensions::{AggregateKey, ViewConsumer};

use super::DashboardEngine;
use super::engine::RegisteredConsumer;

impl DashboardEngine {
    /// Registers a consumer for every aggregate key.
    ///
    /// When the dashboard is already rendered, the consumer immediately
    /// receives the current values.
    pub fn register_consumer(&mut self, consumer: Box<dyn ViewConsumer>) -> DashboardResult<()> {
        self.register(consumer, None)
    }

    /// Registers a consumer for the given keys only.
    pub fn register_consumer_for(
        &mut self,
        consumer: Box<dyn ViewConsumer>,
        keys: &[AggregateKey],
    ) -> DashboardResult<()> {
        if keys.is_empty() {
            return Err(DashboardError::InvalidData(format!(
                "consumer `{}` must subscribe to at least one key",
                consumer.id()
            )));
        }
        let mut interests: SmallVec<[AggregateKey; 4]> = SmallVec::new();
        for key in keys {
            if !interests.contains(key) {
                interests.push(*key);
            }
        }
        self.register(consumer, Some(interests))
    }

    fn register(
        &mut self,
        consumer: Box<dyn ViewConsumer>,
        interests: Option<SmallVec<[AggregateKey; 4]>>,
    ) -> DashboardResult<()> {
        let consumer_id = consumer.id().to_owned();
        if consumer_id.is_empty() {
            return Err(DashboardError::InvalidData(
                "consumer id must not be empty".to_owned(),
            ));
        }
        if self.has_consumer(&consumer_id) {
            return Err(DashboardError::DuplicateConsumer(consumer_id));
        }
        debug!(consumer = %consumer_id, keys = ?interests.as_deref(), "view consumer registered");
        self.consumers.push(RegisteredConsumer {
            consumer,
            interests,
        });
        if let Some(index) = self.consumers.len().checked_sub(1) {
            self.dispatch_to(index);
        }
        Ok(())
    }

    /// Unregisters a consumer by id. Returns `true` when removed.
    pub fn unregister_consumer(&mut self, consumer_id: &str) -> bool {
        if let Some(position) = self
            .consumers
            .iter()
            .position(|entry| entry.consumer.id() == consumer_id)
        {
            self.consumers.remove(position);
            debug!(consumer = consumer_id, "view consumer unregistered");
            return true;
        }
        false
    }

    #[must_use]
    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    #[must_use]
    pub fn has_consumer(&self, consumer_id: &str) -> bool {
        self.consumers
            .iter()
            .any(|entry| entry.consumer.id() == consumer_id)
    }
}
