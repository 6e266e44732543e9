//! Routes for the Frame & Scoring context.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use tenpin_scoring::application::command_handlers;
use tenpin_scoring::application::query_handlers::{self, ScorecardView};
use tenpin_scoring::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{game_id}/rolls.
///
/// `pins` is taken as raw JSON: a non-integer value reaches the game as
/// "not an integer", so an unknown or finished game still answers first.
#[derive(Debug, Deserialize)]
pub struct RecordRollRequest {
    /// Pins knocked down by the roll.
    pub pins: serde_json::Value,
}

/// Response body returned after a game is created.
#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    /// Identifier of the new game.
    pub game_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// POST /
#[instrument(skip(state))]
async fn create_game(State(state): State<AppState>) -> Result<Json<CreateGameResponse>, ApiError> {
    let command = commands::CreateGame {
        correlation_id: Uuid::new_v4(),
        game_id: Uuid::new_v4(),
    };

    info!(
        correlation_id = %command.correlation_id,
        game_id = %command.game_id,
        "handling create_game command"
    );

    let stored_events = command_handlers::handle_create_game(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(CreateGameResponse {
        game_id: command.game_id,
        event_ids,
    }))
}

/// POST /{game_id}/rolls
#[instrument(skip(state, request), fields(game_id = %game_id))]
async fn record_roll(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<RecordRollRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::RecordRoll {
        correlation_id: Uuid::new_v4(),
        game_id,
        pins: request.pins.as_i64(),
    };

    info!(correlation_id = %command.correlation_id, "handling record_roll command");

    let stored_events = command_handlers::handle_record_roll(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(CommandResponse { event_ids }))
}

/// GET /{game_id}
#[instrument(skip(state), fields(game_id = %game_id))]
async fn get_scorecard(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<ScorecardView>, ApiError> {
    let view = query_handlers::get_scorecard(game_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// Returns the router for the games context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/{game_id}", get(get_scorecard))
        .route("/{game_id}/rolls", post(record_roll))
}
