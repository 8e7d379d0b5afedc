//! Fixed clock for deterministic date-bucket boundaries.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::ports::clock::Clock;

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to noon UTC on the given day.
    #[must_use]
    pub fn at_noon(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).unwrap_or_else(|| day.and_time(NaiveTime::MIN));
        Self(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_is_the_pinned_day_whatever_the_hour() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let late = day.and_hms_opt(23, 59, 59).unwrap();
        let clock = FixedClock(Utc.from_utc_datetime(&late));
        assert_eq!(clock.today(), day);
    }
}
