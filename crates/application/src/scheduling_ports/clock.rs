use chrono::{DateTime, Utc};

/// Source of decision and modification timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
