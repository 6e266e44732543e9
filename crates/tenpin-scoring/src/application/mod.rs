//! Application services for the Frame & Scoring context.

pub mod command_handlers;
pub mod query_handlers;
