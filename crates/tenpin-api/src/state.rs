//! Shared application state.

use std::sync::Arc;

use tenpin_core::clock::Clock;
use tenpin_core::repository::EventRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of event timestamps.
    pub clock: Arc<dyn Clock>,
    /// Event store backing every game stream.
    pub event_repository: Arc<dyn EventRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, event_repository: Arc<dyn EventRepository>) -> Self {
        Self {
            clock,
            event_repository,
        }
    }
}
