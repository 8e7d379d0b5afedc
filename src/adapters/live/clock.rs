//! Live adapter for the Clock port.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock that reads the real system time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
