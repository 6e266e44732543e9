//! `EventRepository` doubles for handler and route tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tenpin_core::error::DomainError;
use tenpin_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// One `append_events` call as seen by [`RecordingEventRepository`].
pub type AppendCall = (Uuid, i64, Vec<StoredEvent>);

/// Serves a fixed history from `load_events` and records every append.
///
/// Appends are not folded back into the history, so each command sees the
/// same starting stream.
#[derive(Debug, Default)]
pub struct RecordingEventRepository {
    history: Vec<StoredEvent>,
    appended: Mutex<Vec<AppendCall>>,
}

impl RecordingEventRepository {
    /// A repository whose every stream loads as `history`.
    #[must_use]
    pub fn with_history(history: Vec<StoredEvent>) -> Self {
        Self {
            history,
            appended: Mutex::default(),
        }
    }

    /// Snapshot of the appends made so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<AppendCall> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.history.clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.appended
            .lock()
            .unwrap()
            .push((aggregate_id, expected_version, events.to_vec()));
        Ok(())
    }
}

/// Every stream is empty and appends are dropped.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(Vec::new())
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Every call fails as if the database were unreachable.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// Loads a fixed history, then loses every append to a writer that got
/// there first.
#[derive(Debug)]
pub struct ConflictingEventRepository {
    history: Vec<StoredEvent>,
}

impl ConflictingEventRepository {
    /// A repository whose every stream loads as `history`.
    #[must_use]
    pub fn with_history(history: Vec<StoredEvent>) -> Self {
        Self { history }
    }
}

#[async_trait]
impl EventRepository for ConflictingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.history.clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::ConcurrencyConflict {
            aggregate_id,
            expected: expected_version,
            actual: expected_version + 1,
        })
    }
}
