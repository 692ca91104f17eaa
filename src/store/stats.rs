use crate::buckets::BucketKeys;
use crate::ranking::LeaderboardMode;
use serde::{Deserialize, Serialize};

/// Messages counted in one calendar day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCounter {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub day_key: String,
}

/// Messages counted in one ISO week
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCounter {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub week_key: String,
}

/// Activity counters for one user in one group
///
/// Missing fields in stored data read as zero counts with an empty bucket key, and an empty key never
/// matches a current bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub global: u64,
    #[serde(default)]
    pub daily: DailyCounter,
    #[serde(default)]
    pub weekly: WeeklyCounter,
}

impl UserStats {
    /// A record with no activity, stamped with the given buckets
    #[must_use]
    pub fn new(keys: &BucketKeys) -> Self {
        Self {
            global: 0,
            daily: DailyCounter {
                count: 0,
                day_key: keys.day.clone(),
            },
            weekly: WeeklyCounter {
                count: 0,
                week_key: keys.week.clone(),
            },
        }
    }

    /// Count one message sent during the given buckets
    ///
    /// A counter whose stored key differs from the current one restarts at 1.
    pub fn record(&mut self, keys: &BucketKeys) {
        self.global = self.global.saturating_add(1);

        if self.daily.day_key == keys.day {
            self.daily.count = self.daily.count.saturating_add(1);
        } else {
            self.daily = DailyCounter {
                count: 1,
                day_key: keys.day.clone(),
            };
        }

        if self.weekly.week_key == keys.week {
            self.weekly.count = self.weekly.count.saturating_add(1);
        } else {
            self.weekly = WeeklyCounter {
                count: 1,
                week_key: keys.week.clone(),
            };
        }
    }

    /// Today's count, or 0 when the stored day is not today
    #[must_use]
    pub fn daily_count(&self, keys: &BucketKeys) -> u64 {
        if self.daily.day_key == keys.day { self.daily.count } else { 0 }
    }

    /// This week's count, or 0 when the stored week is not this week
    #[must_use]
    pub fn weekly_count(&self, keys: &BucketKeys) -> u64 {
        if self.weekly.week_key == keys.week { self.weekly.count } else { 0 }
    }

    #[must_use]
    pub fn count_for(&self, mode: LeaderboardMode, keys: &BucketKeys) -> u64 {
        match mode {
            LeaderboardMode::Global => self.global,
            LeaderboardMode::Daily => self.daily_count(keys),
            LeaderboardMode::Weekly => self.weekly_count(keys),
        }
    }
}
