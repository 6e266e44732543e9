//! Score calculation over a game's frames.

use super::frame::Frame;
use super::game::Game;

/// A frame's rolls together with its bonus-inclusive and cumulative score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameScore {
    /// One-based position of the frame in the game.
    pub frame_number: usize,
    pub roll_one: Option<u8>,
    pub roll_two: Option<u8>,
    pub roll_three: Option<u8>,
    pub is_strike: bool,
    pub is_spare: bool,
    pub is_last_frame: bool,
    /// This frame's pins plus any strike or spare bonus earned so far.
    pub frame_score: u32,
    /// Running total through this frame.
    pub cumulative_score: u32,
}

/// Result of scoring a game at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    pub total: u32,
    pub frames: Vec<FrameScore>,
}

impl Scorecard {
    /// Cumulative scores in frame order.
    #[must_use]
    pub fn cumulative_scores(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.cumulative_score).collect()
    }
}

impl Game {
    /// Scores every recorded frame.
    ///
    /// Read-only and callable at any point; bonuses whose lookahead rolls
    /// have not been bowled yet are simply not counted.
    #[must_use]
    pub fn calculate_score(&self) -> Scorecard {
        let mut running_total = 0;
        let frames = self
            .frames
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                let frame_score = score_with_bonus(&self.frames, index);
                running_total += frame_score;
                FrameScore {
                    frame_number: index + 1,
                    roll_one: frame.roll_one,
                    roll_two: frame.roll_two,
                    roll_three: frame.roll_three,
                    is_strike: frame.is_strike,
                    is_spare: frame.is_spare,
                    is_last_frame: frame.is_last_frame,
                    frame_score,
                    cumulative_score: running_total,
                }
            })
            .collect();

        Scorecard {
            total: running_total,
            frames,
        }
    }
}

fn score_with_bonus(frames: &[Frame], index: usize) -> u32 {
    let frame = &frames[index];
    let mut score = frame.frame_score();

    match frames.get(index + 1) {
        Some(next) if frame.is_spare => score += next.first_roll_value(),
        Some(next) if frame.is_strike => {
            // Only the next frame's first two rolls; a tenth-frame third roll is its own bonus.
            score += next.frame_score_excluding_bonus_roll();
            if next.is_strike
                && let Some(after) = frames.get(index + 2)
            {
                score += after.first_roll_value();
            }
        }
        _ => {}
    }

    score
}
