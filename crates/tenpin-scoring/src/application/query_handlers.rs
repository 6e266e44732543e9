//! Query handlers for the Frame & Scoring context.
//!
//! This module contains query handlers that reconstitute aggregates
//! from stored events and return read-only view DTOs.

use serde::Serialize;
use tenpin_core::aggregate::AggregateRoot;
use tenpin_core::error::DomainError;
use tenpin_core::repository::EventRepository;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::scoring::FrameScore;

/// Read-only view of one scored frame.
#[derive(Debug, Serialize)]
pub struct FrameView {
    /// One-based frame number.
    pub frame_number: usize,
    /// First roll, if bowled.
    pub roll_one: Option<u8>,
    /// Second roll, if bowled.
    pub roll_two: Option<u8>,
    /// Tenth-frame bonus roll, if bowled.
    pub roll_three: Option<u8>,
    /// Whether the first roll knocked down every pin.
    pub is_strike: bool,
    /// Whether the first two rolls knocked down every pin.
    pub is_spare: bool,
    /// Whether this is the tenth frame.
    pub is_last_frame: bool,
    /// Frame score including bonuses bowled so far.
    pub frame_score: u32,
    /// Running total through this frame.
    pub cumulative_score: u32,
}

impl From<FrameScore> for FrameView {
    fn from(frame: FrameScore) -> Self {
        Self {
            frame_number: frame.frame_number,
            roll_one: frame.roll_one,
            roll_two: frame.roll_two,
            roll_three: frame.roll_three,
            is_strike: frame.is_strike,
            is_spare: frame.is_spare,
            is_last_frame: frame.is_last_frame,
            frame_score: frame.frame_score,
            cumulative_score: frame.cumulative_score,
        }
    }
}

/// Read-only scorecard of a game.
#[derive(Debug, Serialize)]
pub struct ScorecardView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Lifecycle status as a string.
    pub status: String,
    /// Whether the last frame has been resolved.
    pub is_over: bool,
    /// Total score so far.
    pub total_score: u32,
    /// Scored frames in order.
    pub frames: Vec<FrameView>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves the scorecard of a game by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_scorecard(
    game_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<ScorecardView, DomainError> {
    let stored_events = repo.load_events(game_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(game_id));
    }
    let game = command_handlers::reconstitute(game_id, &stored_events)?;

    let scorecard = game.game().calculate_score();

    Ok(ScorecardView {
        game_id,
        status: game.status_name().to_owned(),
        is_over: game.game().is_over(),
        total_score: scorecard.total,
        frames: scorecard.frames.into_iter().map(FrameView::from).collect(),
        version: game.version(),
    })
}
