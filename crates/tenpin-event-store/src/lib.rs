//! Event store implementations for the Tenpin bowling scorer.
//!
//! Both stores enforce optimistic concurrency per aggregate stream, which is
//! what serializes concurrent rolls against the same game.

pub mod in_memory_event_repository;
pub mod pg_event_repository;
