//! Shared test doubles for the Tenpin bowling scorer.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{
    AppendCall, ConflictingEventRepository, EmptyEventRepository, FailingEventRepository,
    RecordingEventRepository,
};
