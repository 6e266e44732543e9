//! Tenpin: Frame & Scoring bounded context.
//!
//! Responsible for turning a stream of pin counts into frames, deciding
//! when a game is over, and computing the running score including strike
//! and spare bonuses and the tenth-frame bonus rolls.

pub mod application;
pub mod domain;
