//! A single frame of a bowling game.

/// Pins standing at the start of a frame.
pub const MAX_PIN_COUNT: u8 = 10;

/// One frame's rolls and the flags derived from them.
///
/// Frames are created and mutated only by [`crate::domain::game::Game`];
/// outside the crate they are read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub(crate) roll_one: Option<u8>,
    pub(crate) roll_two: Option<u8>,
    /// Only ever set on the last frame.
    pub(crate) roll_three: Option<u8>,
    pub(crate) is_strike: bool,
    pub(crate) is_spare: bool,
    pub(crate) is_last_frame: bool,
}

impl Frame {
    /// Starts a frame with its first roll.
    pub(crate) fn open(first_roll: u8, is_last_frame: bool) -> Self {
        Self {
            roll_one: Some(first_roll),
            is_strike: first_roll == MAX_PIN_COUNT,
            is_last_frame,
            ..Self::default()
        }
    }

    /// Pins knocked down by the first roll, if recorded.
    #[must_use]
    pub fn roll_one(&self) -> Option<u8> {
        self.roll_one
    }

    /// Pins knocked down by the second roll, if recorded.
    #[must_use]
    pub fn roll_two(&self) -> Option<u8> {
        self.roll_two
    }

    /// Pins knocked down by the third (tenth-frame bonus) roll, if recorded.
    #[must_use]
    pub fn roll_three(&self) -> Option<u8> {
        self.roll_three
    }

    #[must_use]
    pub fn is_strike(&self) -> bool {
        self.is_strike
    }

    #[must_use]
    pub fn is_spare(&self) -> bool {
        self.is_spare
    }

    #[must_use]
    pub fn is_last_frame(&self) -> bool {
        self.is_last_frame
    }

    /// Recorded rolls in delivery order.
    pub fn rolls(&self) -> impl Iterator<Item = u8> {
        [self.roll_one, self.roll_two, self.roll_three]
            .into_iter()
            .flatten()
    }

    /// Number of rolls recorded so far.
    #[must_use]
    pub fn roll_count(&self) -> usize {
        self.rolls().count()
    }

    /// Sum of every recorded roll; missing rolls count as zero.
    #[must_use]
    pub fn frame_score(&self) -> u32 {
        self.rolls().map(u32::from).sum()
    }

    /// Sum of the first two rolls only.
    ///
    /// Used when an earlier strike looks ahead into this frame: a tenth-frame
    /// third roll belongs to this frame's own bonus, not the earlier one.
    #[must_use]
    pub fn frame_score_excluding_bonus_roll(&self) -> u32 {
        [self.roll_one, self.roll_two]
            .into_iter()
            .flatten()
            .map(u32::from)
            .sum()
    }

    /// First roll, or zero when unset.
    #[must_use]
    pub fn first_roll_value(&self) -> u32 {
        self.roll_one.map_or(0, u32::from)
    }

    /// True when the last frame has earned bonus rolls with a strike or spare.
    pub(crate) fn earned_bonus_rolls(&self) -> bool {
        self.is_last_frame && (self.is_strike || self.is_spare)
    }

    /// Whether no further roll may land in this frame.
    ///
    /// A regular frame closes on a strike or after two rolls. The last frame
    /// closes after two rolls when open, three when marked.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        if self.is_last_frame {
            let allotment = if self.earned_bonus_rolls() { 3 } else { 2 };
            self.roll_count() >= allotment
        } else {
            self.is_strike || self.roll_two.is_some()
        }
    }
}
