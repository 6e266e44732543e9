//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An event-sourced aggregate: state is rebuilt by applying its stream in
/// order, and commands stage new events until they are persisted.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Number of stored events applied so far. Zero for a stream that does
    /// not exist yet; otherwise the sequence number of the last event.
    fn version(&self) -> i64;

    /// Apply a stored event to rebuild state.
    fn apply(&mut self, event: &Self::Event);

    /// Events staged by command handling, oldest first.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after persistence.
    fn clear_uncommitted_events(&mut self);

    /// Sequence number the next staged event will carry.
    fn next_sequence_number(&self) -> i64 {
        let staged = i64::try_from(self.uncommitted_events().len()).unwrap_or(i64::MAX);
        self.version().saturating_add(staged).saturating_add(1)
    }
}
