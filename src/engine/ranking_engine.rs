use crate::Result;
use crate::buckets::{BucketCalendar, BucketKeys, Clock, SystemClock};
use crate::config::Config;
use crate::filter::{MessageFilter, PatternFilter};
use crate::ranking::{LeaderboardMode, LeaderboardOutcome, ProfileOutcome, build_leaderboard, build_profile};
use crate::store::{DirtyGroups, GroupRegistry, GroupTable, JsonFileStore, TablePersistence, UserStats};
use std::sync::{Arc, Mutex};

const LOG_TARGET: &str = "    engine";

/// Leaderboard length used unless configured otherwise
pub const DEFAULT_LEADERBOARD_SIZE: usize = 15;

/// What a flush wrote and what it has to retry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

impl FlushSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.failed.is_empty()
    }
}

/// Per-group message counters with leaderboard and profile queries
#[derive(Debug)]
pub struct RankingEngine {
    registry: GroupRegistry,
    dirty: DirtyGroups,
    calendar: BucketCalendar,
    clock: Arc<dyn Clock>,
    filter: Arc<dyn MessageFilter>,
    leaderboard_size: usize,
    flush_lock: Mutex<()>,
}

impl RankingEngine {
    /// An engine on the wall clock that skips messages mentioning `bot` or `system`
    #[must_use]
    pub fn new(persistence: Arc<dyn TablePersistence>, calendar: BucketCalendar) -> Self {
        Self {
            registry: GroupRegistry::new(persistence),
            dirty: DirtyGroups::new(),
            calendar,
            clock: Arc::new(SystemClock),
            filter: Arc::new(PatternFilter::system_words()),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            flush_lock: Mutex::new(()),
        }
    }

    /// An engine storing JSON files in the configured ranking directory
    ///
    /// # Errors
    ///
    /// Returns an error if the configured time zone or message pattern is invalid
    pub fn from_config(config: &Config) -> Result<Self> {
        let persistence = Arc::new(JsonFileStore::new(config.ranking_dir.as_std_path()));
        let filter = Arc::new(PatternFilter::new(config.system_message_regex()?));

        Ok(Self::new(persistence, BucketCalendar::new(config.tz()?))
            .with_filter(filter)
            .with_leaderboard_size(config.leaderboard_size))
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Arc<dyn MessageFilter>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub const fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    #[must_use]
    pub const fn calendar(&self) -> &BucketCalendar {
        &self.calendar
    }

    /// Bucket keys for the current instant
    #[must_use]
    pub fn current_keys(&self) -> BucketKeys {
        self.calendar.current(self.clock.as_ref())
    }

    /// Count one message from `user_id` in `group_id`
    ///
    /// The caller is responsible for only passing group messages. Messages the filter flags as bot or
    /// system output are ignored. Nothing is written to storage here; the group is marked dirty and
    /// written by the next flush.
    pub fn record_activity(&self, group_id: &str, user_id: &str, raw_text: &str) {
        if self.filter.is_system_message(raw_text) {
            log::trace!(target: LOG_TARGET, "Not counting system message from {user_id} in {group_id}");
            return;
        }

        let keys = self.current_keys();
        let handle = self.registry.ensure_loaded(group_id);
        handle.lock().expect("lock poisoned").record_activity(user_id, &keys);
        self.mark_dirty(group_id);
    }

    pub fn mark_dirty(&self, group_id: &str) {
        self.dirty.mark(group_id);
    }

    #[must_use]
    pub fn is_dirty(&self, group_id: &str) -> bool {
        self.dirty.is_dirty(group_id)
    }

    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Write every dirty group to storage
    ///
    /// Each table is copied under its lock and written after the lock is released, so recording can
    /// continue while the write is in progress. Groups that fail to write are marked dirty again.
    ///
    /// Flushes run one at a time: an older copy of a table is never written after a newer one.
    pub fn flush_all(&self) -> FlushSummary {
        let _flushing = self.flush_lock.lock().expect("lock poisoned");
        let mut summary = FlushSummary::default();

        for group_id in self.dirty.take() {
            let Some(handle) = self.registry.resident(&group_id) else {
                log::warn!(target: LOG_TARGET, "Group {group_id} was marked dirty but is not resident");
                continue;
            };

            let snapshot = handle.lock().expect("lock poisoned").clone();
            match self.registry.persistence().save_table(&group_id, &snapshot) {
                Ok(()) => summary.written.push(group_id),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Unable to persist group {group_id}, will retry: {e:#}");
                    self.dirty.mark(&group_id);
                    summary.failed.push(group_id);
                }
            }
        }

        if !summary.is_empty() {
            log::debug!(
                target: LOG_TARGET,
                "Flushed {} group(s), {} failed",
                summary.written.len(),
                summary.failed.len()
            );
        }

        summary
    }

    /// Top users of a group for one mode
    #[must_use]
    pub fn leaderboard(&self, group_id: &str, mode: LeaderboardMode) -> LeaderboardOutcome {
        let Some(handle) = self.registry.resident_or_stored(group_id) else {
            return LeaderboardOutcome::NoData;
        };

        let keys = self.current_keys();
        let table = handle.lock().expect("lock poisoned");
        build_leaderboard(&table, mode, &keys, self.leaderboard_size)
    }

    /// Rank and neighbour gaps of one user
    #[must_use]
    pub fn profile(&self, group_id: &str, user_id: &str) -> ProfileOutcome {
        let Some(handle) = self.registry.resident_or_stored(group_id) else {
            return ProfileOutcome::NoData;
        };

        let keys = self.current_keys();
        let table = handle.lock().expect("lock poisoned");
        build_profile(&table, user_id, &keys)
    }

    /// A copy of a user's stored counters, as they are in memory
    #[must_use]
    pub fn user_stats(&self, group_id: &str, user_id: &str) -> Option<UserStats> {
        let handle = self.registry.resident_or_stored(group_id)?;
        let table = handle.lock().expect("lock poisoned");
        table.get(user_id).cloned()
    }

    /// A copy of a group's table, as it is in memory
    #[must_use]
    pub fn table_snapshot(&self, group_id: &str) -> Option<GroupTable> {
        let handle = self.registry.resident_or_stored(group_id)?;
        let table = handle.lock().expect("lock poisoned").clone();
        Some(table)
    }
}
