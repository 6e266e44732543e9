//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::StoredEvent;

/// Envelope fields shared by every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for deserialization routing.
    pub event_type: String,
    /// Aggregate/stream this event belongs to.
    pub aggregate_id: Uuid,
    /// Position within the aggregate stream, starting at 1.
    pub sequence_number: i64,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the event/command that caused it.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Rebuilds the envelope of a persisted event.
    #[must_use]
    pub fn from_stored(stored: &StoredEvent) -> Self {
        Self {
            event_id: stored.event_id,
            event_type: stored.event_type.clone(),
            aggregate_id: stored.aggregate_id,
            sequence_number: stored.sequence_number,
            correlation_id: stored.correlation_id,
            causation_id: stored.causation_id,
            occurred_at: stored.occurred_at,
        }
    }
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;

    /// Flattens the event into the row shape repositories persist.
    fn to_stored_event(&self) -> StoredEvent {
        let meta = self.metadata();
        StoredEvent {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: self.event_type().to_owned(),
            payload: self.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            causation_id: meta.causation_id,
            occurred_at: meta.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[derive(Debug)]
    struct PinsCounted {
        metadata: EventMetadata,
        pins: u8,
    }

    impl DomainEvent for PinsCounted {
        fn event_type(&self) -> &'static str {
            "test.pins_counted"
        }

        fn to_payload(&self) -> serde_json::Value {
            serde_json::json!({ "pins": self.pins })
        }

        fn metadata(&self) -> &EventMetadata {
            &self.metadata
        }
    }

    fn metadata() -> EventMetadata {
        EventMetadata {
            event_id: Uuid::new_v4(),
            event_type: "test.pins_counted".into(),
            aggregate_id: Uuid::new_v4(),
            sequence_number: 4,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_to_stored_event_copies_envelope_and_payload() {
        let event = PinsCounted {
            metadata: metadata(),
            pins: 9,
        };

        let stored = event.to_stored_event();

        assert_eq!(stored.event_id, event.metadata.event_id);
        assert_eq!(stored.aggregate_id, event.metadata.aggregate_id);
        assert_eq!(stored.event_type, "test.pins_counted");
        assert_eq!(stored.payload, serde_json::json!({ "pins": 9 }));
        assert_eq!(stored.sequence_number, 4);
        assert_eq!(stored.occurred_at, event.metadata.occurred_at);
    }

    #[test]
    fn test_from_stored_restores_metadata() {
        let original = metadata();
        let stored = PinsCounted {
            metadata: original.clone(),
            pins: 1,
        }
        .to_stored_event();

        let restored = EventMetadata::from_stored(&stored);

        assert_eq!(restored.event_id, original.event_id);
        assert_eq!(restored.event_type, original.event_type);
        assert_eq!(restored.correlation_id, original.correlation_id);
        assert_eq!(restored.causation_id, original.causation_id);
        assert_eq!(restored.sequence_number, original.sequence_number);
    }
}
