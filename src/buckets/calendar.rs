use crate::buckets::Clock;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// The day and week an instant belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKeys {
    pub day: String,
    pub week: String,
}

/// Computes bucket keys in a fixed time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketCalendar {
    tz: Tz,
}

impl BucketCalendar {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Calendar date of `instant` in this zone, as `YYYY-MM-DD`
    #[must_use]
    pub fn day_key(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.tz).format("%Y-%m-%d").to_string()
    }

    /// ISO week of `instant` in this zone, as `GGGG-VV`
    #[must_use]
    pub fn week_key(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.tz).format("%G-%V").to_string()
    }

    #[must_use]
    pub fn keys_at(&self, instant: DateTime<Utc>) -> BucketKeys {
        BucketKeys {
            day: self.day_key(instant),
            week: self.week_key(instant),
        }
    }

    /// Keys for the clock's current instant
    #[must_use]
    pub fn current(&self, clock: &dyn Clock) -> BucketKeys {
        self.keys_at(clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn colombo() -> BucketCalendar {
        BucketCalendar::new(chrono_tz::Asia::Colombo)
    }

    #[test]
    fn test_day_key_uses_zone_offset() {
        let calendar = colombo();
        let afternoon = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let after_local_midnight = Utc.with_ymd_and_hms(2024, 3, 1, 18, 45, 0).unwrap();

        assert_eq!(calendar.day_key(afternoon), "2024-03-01");
        assert_eq!(calendar.day_key(after_local_midnight), "2024-03-02");
        assert_eq!(BucketCalendar::new(chrono_tz::UTC).day_key(after_local_midnight), "2024-03-01");
    }

    #[test]
    fn test_week_key_is_iso_week() {
        let calendar = colombo();
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(calendar.week_key(instant), "2024-09");
    }

    #[test]
    fn test_week_key_at_year_boundary_uses_week_year() {
        let calendar = colombo();
        let new_years_eve = Utc.with_ymd_and_hms(2024, 12, 30, 19, 0, 0).unwrap();

        let keys = calendar.keys_at(new_years_eve);
        assert_eq!(keys.day, "2024-12-31");
        assert_eq!(keys.week, "2025-01");
    }

    #[test]
    fn test_keys_sort_chronologically() {
        let calendar = colombo();
        let mut instant = Utc.with_ymd_and_hms(2023, 12, 20, 0, 0, 0).unwrap();
        let mut previous = calendar.keys_at(instant);

        for _ in 0..60 {
            instant += chrono::TimeDelta::hours(13);
            let keys = calendar.keys_at(instant);
            assert!(keys.day >= previous.day, "{} before {}", keys.day, previous.day);
            assert!(keys.week >= previous.week, "{} before {}", keys.week, previous.week);
            previous = keys;
        }
    }

    #[test]
    fn test_current_reads_the_clock() {
        let calendar = colombo();
        let clock = crate::buckets::ManualClock::new(Utc.with_ymd_and_hms(2024, 7, 4, 3, 0, 0).unwrap());
        assert_eq!(calendar.current(&clock).day, "2024-07-04");
    }
}
