//! Command abstractions.

use uuid::Uuid;

/// A request to change one aggregate.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Namespaced command name, e.g. `scoring.record_roll`; used as a log field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried onto every event the command produces.
    fn correlation_id(&self) -> Uuid;
}
