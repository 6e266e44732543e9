//! Command handlers for the Frame & Scoring context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use tenpin_core::aggregate::AggregateRoot;
use tenpin_core::clock::Clock;
use tenpin_core::command::Command;
use tenpin_core::error::DomainError;
use tenpin_core::event::{DomainEvent, EventMetadata};
use tenpin_core::repository::{EventRepository, StoredEvent};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::aggregates::BowlingGame;
use crate::domain::commands::{CreateGame, RecordRoll};
use crate::domain::events::{ScoringEvent, ScoringEventKind};

/// Reconstitutes a `BowlingGame` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if an event cannot be decoded or
/// does not fit the game rebuilt from the events before it.
pub(crate) fn reconstitute(
    game_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<BowlingGame, DomainError> {
    let mut game = BowlingGame::new(game_id);
    for stored in existing_events {
        let kind: ScoringEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = ScoringEvent {
            metadata: EventMetadata::from_stored(stored),
            kind,
        };
        game.check_replay(&event)?;
        game.apply(&event);
    }
    Ok(game)
}

/// Converts pending events and appends them at the aggregate's loaded version.
async fn persist(
    game: &BowlingGame,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events: Vec<StoredEvent> = game
        .uncommitted_events()
        .iter()
        .map(DomainEvent::to_stored_event)
        .collect();

    repo.append_events(game.id, game.version(), &stored_events)
        .await?;

    Ok(stored_events)
}

/// Handles the `CreateGame` command: checks the stream is empty, starts the
/// game, and persists the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if event loading, validation, or appending fails.
pub async fn handle_create_game(
    command: &CreateGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    debug!(command = command.command_type(), game_id = %command.game_id, "handling command");
    let existing_events = repo.load_events(command.game_id).await?;
    let mut game = reconstitute(command.game_id, &existing_events)?;

    game.create(command.correlation_id, clock)?;

    let stored_events = persist(&game, repo).await?;
    info!(game_id = %command.game_id, "game created");

    Ok(stored_events)
}

/// Handles the `RecordRoll` command: reconstitutes the game, validates and
/// records the roll, and persists the resulting events.
///
/// Concurrent rolls against the same game are serialized by the repository's
/// version check; the loser receives `DomainError::ConcurrencyConflict`.
///
/// # Errors
///
/// Returns `DomainError` if event loading, validation, or appending fails.
pub async fn handle_record_roll(
    command: &RecordRoll,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    debug!(command = command.command_type(), game_id = %command.game_id, "handling command");
    let existing_events = repo.load_events(command.game_id).await?;
    let mut game = reconstitute(command.game_id, &existing_events)?;

    game.record_roll(command.pins, command.correlation_id, clock)?;

    let stored_events = persist(&game, repo).await?;
    debug!(game_id = %command.game_id, pins = ?command.pins, "roll recorded");

    for event in game.uncommitted_events() {
        if let ScoringEventKind::GameCompleted(payload) = &event.kind {
            info!(
                game_id = %payload.game_id,
                total_score = payload.total_score,
                "game completed"
            );
        }
    }

    Ok(stored_events)
}
