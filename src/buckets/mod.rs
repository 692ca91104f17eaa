//! Day and week bucket keys.
//!
//! A bucket key names the calendar day (`YYYY-MM-DD`) or ISO week (`GGGG-VV`) that an instant falls in,
//! evaluated in one fixed time zone. Both formats sort lexicographically in chronological order, and the
//! week key uses the ISO week-numbering year so the last days of December that belong to week 1 of the
//! next year get the next year's key.

mod calendar;
mod clock;

pub use calendar::{BucketCalendar, BucketKeys};
pub use clock::{Clock, ManualClock, SystemClock};
