//! Roll intake state machine.

use super::errors::ScoringError;
use super::frame::{Frame, MAX_PIN_COUNT};

/// Frames in a complete game.
pub const FRAME_COUNT: usize = 10;

/// A single-player game: its frames and whether it has finished.
///
/// The current frame is always the last element of `frames`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub(crate) frames: Vec<Frame>,
    pub(crate) is_over: bool,
}

impl Game {
    /// Creates an empty game with no frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames recorded so far, in order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Whether the last frame has been fully resolved.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// The frame the next roll will land in, unless that roll opens a new one.
    #[must_use]
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Checks whether `pins` may be recorded next and returns it as a pin count.
    ///
    /// `None` stands for a submitted value that is not an integer at all.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::GameOver` once the game has finished, whatever
    /// `pins` is. Otherwise returns `ScoringError::InvalidScore` when `pins` is
    /// not an integer in `0..=10` or would push a regular frame past ten pins.
    pub fn validate_roll(&self, pins: Option<i64>) -> Result<u8, ScoringError> {
        if self.is_over {
            return Err(ScoringError::GameOver);
        }

        let pins = pins.ok_or_else(|| {
            ScoringError::InvalidScore("pin count must be an integer".to_owned())
        })?;

        let pins = u8::try_from(pins)
            .ok()
            .filter(|p| *p <= MAX_PIN_COUNT)
            .ok_or_else(|| {
                ScoringError::InvalidScore(format!(
                    "pin count {pins} is outside 0..={MAX_PIN_COUNT}"
                ))
            })?;

        if let Some(frame) = self.open_frame()
            && !frame.earned_bonus_rolls()
            && frame.first_roll_value() + u32::from(pins) > u32::from(MAX_PIN_COUNT)
        {
            return Err(ScoringError::InvalidScore(format!(
                "{} + {pins} pins exceeds {MAX_PIN_COUNT} in one frame",
                frame.first_roll_value()
            )));
        }

        Ok(pins)
    }

    /// Records one roll, opening a new frame or completing the current one.
    ///
    /// Nothing is changed when the roll is rejected.
    ///
    /// # Errors
    ///
    /// See [`Game::validate_roll`].
    pub fn add_roll(&mut self, pins: i64) -> Result<(), ScoringError> {
        let pins = self.validate_roll(Some(pins))?;
        self.record_validated_roll(pins);
        Ok(())
    }

    /// Applies a pin count already accepted by [`Game::validate_roll`].
    pub(crate) fn record_validated_roll(&mut self, pins: u8) {
        match self.frames.last_mut().filter(|frame| !frame.is_closed()) {
            Some(frame) => {
                if frame.earned_bonus_rolls() {
                    // A spare already holds roll_two, so its one bonus lands in roll_three.
                    if frame.roll_two.is_none() {
                        frame.roll_two = Some(pins);
                    } else {
                        frame.roll_three = Some(pins);
                        self.is_over = true;
                    }
                } else {
                    frame.roll_two = Some(pins);
                    frame.is_spare = frame.first_roll_value() + u32::from(pins)
                        == u32::from(MAX_PIN_COUNT);
                    if frame.is_last_frame && !frame.is_spare {
                        self.is_over = true;
                    }
                }
            }
            None => {
                let is_last_frame = self.frames.len() + 1 == FRAME_COUNT;
                self.frames.push(Frame::open(pins, is_last_frame));
            }
        }
    }

    fn open_frame(&self) -> Option<&Frame> {
        self.frames.last().filter(|frame| !frame.is_closed())
    }
}
