//! Commands for the Frame & Scoring context.

use tenpin_core::command::Command;
use uuid::Uuid;

/// Command to start a new, empty game.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier assigned to the new game.
    pub game_id: Uuid,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "scoring.create_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record the pins knocked down by one roll.
#[derive(Debug, Clone)]
pub struct RecordRoll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game the roll belongs to.
    pub game_id: Uuid,
    /// Pins knocked down, validated against the game before recording.
    /// `None` when the submitted value was not an integer.
    pub pins: Option<i64>,
}

impl Command for RecordRoll {
    fn command_type(&self) -> &'static str {
        "scoring.record_roll"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
