//! In-process implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use tenpin_core::error::DomainError;
use tenpin_core::repository::{EventRepository, StoredEvent};

/// Event repository that keeps every stream in memory.
///
/// Used when no database is configured. Streams live as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: RwLock<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Infrastructure("event stream lock poisoned".into())
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.read().map_err(poisoned)?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }

        let mut streams = self.streams.write().map_err(poisoned)?;

        let actual = streams
            .get(&aggregate_id)
            .and_then(|stream| stream.last())
            .map_or(0, |e| e.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        let stream = streams.entry(aggregate_id).or_default();
        stream.extend_from_slice(events);
        let version = stream.last().map_or(actual, |e| e.sequence_number);
        debug!(%aggregate_id, appended = events.len(), version, "events appended");
        Ok(())
    }
}
