//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Date-bucket classification derives "today" and "tomorrow" from this
/// port, so substituting a fixed clock makes bucket boundaries fully
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar-day projection of the current time in UTC.
    ///
    /// This is the single consistent day reference every classification
    /// pass uses; callers must not mix it with local-timezone dates.
    fn today(&self) -> chrono::NaiveDate {
        self.now().date_naive()
    }
}
