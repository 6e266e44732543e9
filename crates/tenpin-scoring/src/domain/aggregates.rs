//! Aggregate roots for the Frame & Scoring context.

use tenpin_core::aggregate::AggregateRoot;
use tenpin_core::clock::Clock;
use tenpin_core::error::DomainError;
use tenpin_core::event::EventMetadata;
use tracing::warn;
use uuid::Uuid;

use super::events::{GameCompleted, GameCreated, RollRecorded, ScoringEvent, ScoringEventKind};
use super::game::Game;

/// The aggregate root for a bowling game.
///
/// Rolls are kept as events; the frame state is rebuilt by replaying them
/// through [`Game::add_roll`].
#[derive(Debug)]
pub struct BowlingGame {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Set once `GameCreated` has been applied.
    pub(crate) created: bool,
    /// Frames rebuilt from recorded rolls.
    pub(crate) game: Game,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<ScoringEvent>,
}

impl BowlingGame {
    /// Creates an empty aggregate for `id`.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            created: false,
            game: Game::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// The replayed game state.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Lifecycle status name used by read models.
    #[must_use]
    pub fn status_name(&self) -> &'static str {
        if self.game.is_over() {
            "completed"
        } else if self.game.frames().is_empty() {
            "awaiting_first_roll"
        } else {
            "in_progress"
        }
    }

    fn record(&mut self, kind: ScoringEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = ScoringEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };

        self.uncommitted_events.push(event);
    }

    /// Starts the game, producing a `GameCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game already exists.
    pub fn create(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.created || self.version > 0 {
            return Err(DomainError::Validation("game already exists".to_owned()));
        }

        self.record(
            ScoringEventKind::GameCreated(GameCreated { game_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records one roll, producing `RollRecorded` and, when the roll resolves
    /// the last frame, `GameCompleted`.
    ///
    /// `pins` is `None` when the submitted value was not an integer.
    ///
    /// # Errors
    ///
    /// Checked in order: `DomainError::AggregateNotFound` if the game was never
    /// created, `DomainError::GameOver` after the last frame is resolved, and
    /// `DomainError::InvalidScore` for values the current frame cannot take.
    pub fn record_roll(
        &mut self,
        pins: Option<i64>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::AggregateNotFound(self.id));
        }

        let game_id = self.id;
        let pins = self
            .game
            .validate_roll(pins)
            .map_err(|e| e.into_domain_error(game_id))?;

        let mut next = self.game.clone();
        next.record_validated_roll(pins);

        self.record(
            ScoringEventKind::RollRecorded(RollRecorded { game_id, pins }),
            correlation_id,
            clock,
        );

        if next.is_over() {
            self.record(
                ScoringEventKind::GameCompleted(GameCompleted {
                    game_id,
                    total_score: next.calculate_score().total,
                }),
                correlation_id,
                clock,
            );
        }

        Ok(())
    }

    /// Checks that a stored event can be replayed onto the current state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` naming the offending sequence
    /// number when the stream is inconsistent.
    pub(crate) fn check_replay(&self, event: &ScoringEvent) -> Result<(), DomainError> {
        let sequence_number = event.metadata.sequence_number;
        let inconsistent = |reason: String| {
            DomainError::Infrastructure(format!(
                "game {} event {sequence_number} cannot be replayed: {reason}",
                self.id
            ))
        };

        match &event.kind {
            ScoringEventKind::GameCreated(_) if self.created => {
                Err(inconsistent("game created twice".to_owned()))
            }
            ScoringEventKind::GameCreated(_) => Ok(()),
            ScoringEventKind::RollRecorded(_) if !self.created => {
                Err(inconsistent("roll before game creation".to_owned()))
            }
            ScoringEventKind::RollRecorded(payload) => self
                .game
                .validate_roll(Some(i64::from(payload.pins)))
                .map(|_| ())
                .map_err(|e| inconsistent(format!("roll of {} pins rejected: {e}", payload.pins))),
            ScoringEventKind::GameCompleted(_) if !self.game.is_over() => Err(inconsistent(
                "completion before the last frame was resolved".to_owned(),
            )),
            ScoringEventKind::GameCompleted(_) => Ok(()),
        }
    }
}

impl AggregateRoot for BowlingGame {
    type Event = ScoringEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            ScoringEventKind::GameCreated(_) => {
                self.created = true;
            }
            ScoringEventKind::RollRecorded(payload) => {
                // Streams are checked by `check_replay` before they get here.
                if let Err(err) = self.game.add_roll(i64::from(payload.pins)) {
                    warn!(
                        game_id = %self.id,
                        sequence_number = event.metadata.sequence_number,
                        pins = payload.pins,
                        error = %err,
                        "stored roll does not fit the replayed game; skipping"
                    );
                }
            }
            ScoringEventKind::GameCompleted(payload) => {
                if !self.game.is_over() {
                    warn!(
                        game_id = %self.id,
                        total_score = payload.total_score,
                        "game completion recorded before the last frame was resolved"
                    );
                }
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
