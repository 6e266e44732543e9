//! Domain events for the Frame & Scoring context.

use serde::{Deserialize, Serialize};
use tenpin_core::event::{DomainEvent, EventMetadata};
use uuid::Uuid;

/// Emitted when a new game is started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCreated {
    /// The game identifier.
    pub game_id: Uuid,
}

/// Emitted for every accepted roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecorded {
    /// The game identifier.
    pub game_id: Uuid,
    /// Pins knocked down (0–10).
    pub pins: u8,
}

/// Emitted together with the roll that resolves the last frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCompleted {
    /// The game identifier.
    pub game_id: Uuid,
    /// Final score including all bonuses.
    pub total_score: u32,
}

/// Event payload variants for the Frame & Scoring context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringEventKind {
    /// A game was started.
    GameCreated(GameCreated),
    /// A roll was accepted.
    RollRecorded(RollRecorded),
    /// The game reached its end.
    GameCompleted(GameCompleted),
}

impl ScoringEventKind {
    /// Event type name used for routing and storage.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GameCreated(_) => "scoring.game_created",
            Self::RollRecorded(_) => "scoring.roll_recorded",
            Self::GameCompleted(_) => "scoring.game_completed",
        }
    }
}

/// Domain event envelope for the Frame & Scoring context.
#[derive(Debug, Clone)]
pub struct ScoringEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ScoringEventKind,
}

impl DomainEvent for ScoringEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ScoringEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
