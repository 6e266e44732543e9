//! Domain model for the Frame & Scoring context.

pub mod aggregates;
pub mod commands;
pub mod errors;
pub mod events;
pub mod frame;
pub mod game;
pub mod scoring;
