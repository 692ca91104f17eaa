use crate::buckets::BucketKeys;
use crate::store::UserStats;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Counters for every user seen in one group, in first-seen order
///
/// Serializes as a plain JSON object keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupTable {
    users: IndexMap<String, UserStats>,
}

impl GroupTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<&UserStats> {
        self.users.get(user_id)
    }

    /// Users and their counters in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserStats)> {
        self.users.iter().map(|(id, stats)| (id.as_str(), stats))
    }

    /// Count one message from `user_id`, creating the user's record if needed
    pub fn record_activity(&mut self, user_id: &str, keys: &BucketKeys) {
        if let Some(stats) = self.users.get_mut(user_id) {
            stats.record(keys);
        } else {
            let mut stats = UserStats::new(keys);
            stats.record(keys);
            let _ = self.users.insert(user_id.to_string(), stats);
        }
    }

    /// Put a user's counters in place, keeping their position if already present
    pub fn insert(&mut self, user_id: impl Into<String>, stats: UserStats) {
        let _ = self.users.insert(user_id.into(), stats);
    }
}
