use crate::buckets::BucketKeys;
use crate::ranking::{LeaderboardMode, Medal};
use crate::store::GroupTable;

/// One line of a leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based place
    pub position: usize,
    pub user_id: String,
    pub count: u64,
}

impl LeaderboardEntry {
    #[must_use]
    pub const fn medal(&self) -> Option<Medal> {
        Medal::for_position(self.position)
    }
}

/// The top of a group's ranking for one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub mode: LeaderboardMode,
    pub entries: Vec<LeaderboardEntry>,
    /// Users with a non-zero count, including those cut from `entries`
    pub total_active: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardOutcome {
    Ranked(Leaderboard),

    /// Nothing has ever been recorded for the group
    NoData,

    /// The group has data but nobody has a non-zero count in this mode
    NoActive(LeaderboardMode),
}

/// Rank a table's users by their count for `mode`, keeping at most `limit` entries
#[must_use]
pub fn build_leaderboard(table: &GroupTable, mode: LeaderboardMode, keys: &BucketKeys, limit: usize) -> LeaderboardOutcome {
    let mut active: Vec<_> = table
        .iter()
        .map(|(id, stats)| (id, stats.count_for(mode, keys)))
        .filter(|&(_, count)| count > 0)
        .collect();

    if active.is_empty() {
        return LeaderboardOutcome::NoActive(mode);
    }

    // stable: equal counts stay in first-seen order
    active.sort_by(|a, b| b.1.cmp(&a.1));

    let total_active = active.len();
    let entries = active
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (id, count))| LeaderboardEntry {
            position: index + 1,
            user_id: id.to_string(),
            count,
        })
        .collect();

    LeaderboardOutcome::Ranked(Leaderboard {
        mode,
        entries,
        total_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DailyCounter, UserStats, WeeklyCounter};

    const LIMIT: usize = 15;

    fn today() -> BucketKeys {
        BucketKeys {
            day: "2024-03-02".to_string(),
            week: "2024-09".to_string(),
        }
    }

    fn stats(global: u64, daily: (u64, &str), weekly: (u64, &str)) -> UserStats {
        UserStats {
            global,
            daily: DailyCounter {
                count: daily.0,
                day_key: daily.1.to_string(),
            },
            weekly: WeeklyCounter {
                count: weekly.0,
                week_key: weekly.1.to_string(),
            },
        }
    }

    fn ranked(outcome: LeaderboardOutcome) -> Leaderboard {
        match outcome {
            LeaderboardOutcome::Ranked(board) => board,
            other => panic!("expected Ranked, got {other:?}"),
        }
    }

    #[test]
    fn test_global_order_with_stable_ties() {
        let mut table = GroupTable::new();
        table.insert("A", stats(10, (0, ""), (0, "")));
        table.insert("B", stats(7, (0, ""), (0, "")));
        table.insert("C", stats(7, (0, ""), (0, "")));

        let board = ranked(build_leaderboard(&table, LeaderboardMode::Global, &today(), LIMIT));
        let lines: Vec<_> = board.entries.iter().map(|e| (e.position, e.user_id.as_str(), e.count)).collect();
        assert_eq!(lines, [(1, "A", 10), (2, "B", 7), (3, "C", 7)]);
        assert_eq!(board.total_active, 3);
        assert_eq!(board.entries[0].medal(), Some(Medal::Gold));
    }

    #[test]
    fn test_stale_daily_counts_are_excluded() {
        let mut table = GroupTable::new();
        table.insert("old", stats(50, (9, "2024-03-01"), (9, "2024-09")));
        table.insert("new", stats(2, (2, "2024-03-02"), (2, "2024-09")));

        let board = ranked(build_leaderboard(&table, LeaderboardMode::Daily, &today(), LIMIT));
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].user_id, "new");
        assert_eq!(board.total_active, 1);

        let weekly = ranked(build_leaderboard(&table, LeaderboardMode::Weekly, &today(), LIMIT));
        let order: Vec<_> = weekly.entries.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, ["old", "new"]);
    }

    #[test]
    fn test_no_active_users() {
        let mut table = GroupTable::new();
        table.insert("old", stats(5, (5, "2024-02-01"), (5, "2024-05")));

        assert_eq!(
            build_leaderboard(&table, LeaderboardMode::Daily, &today(), LIMIT),
            LeaderboardOutcome::NoActive(LeaderboardMode::Daily)
        );
        assert_eq!(
            build_leaderboard(&GroupTable::new(), LeaderboardMode::Global, &today(), LIMIT),
            LeaderboardOutcome::NoActive(LeaderboardMode::Global)
        );
    }

    #[test]
    fn test_zero_counts_never_listed() {
        let mut table = GroupTable::new();
        table.insert("zero", stats(0, (0, "2024-03-02"), (0, "2024-09")));
        table.insert("one", stats(1, (1, "2024-03-02"), (1, "2024-09")));

        for mode in [LeaderboardMode::Global, LeaderboardMode::Daily, LeaderboardMode::Weekly] {
            let board = ranked(build_leaderboard(&table, mode, &today(), LIMIT));
            assert!(board.entries.iter().all(|e| e.count > 0), "{mode}");
            assert_eq!(board.total_active, 1);
        }
    }

    #[test]
    fn test_truncated_to_limit_with_true_total() {
        let mut table = GroupTable::new();
        for i in 0..20u64 {
            table.insert(format!("user{i}"), stats(i + 1, (0, ""), (0, "")));
        }

        let board = ranked(build_leaderboard(&table, LeaderboardMode::Global, &today(), LIMIT));
        assert_eq!(board.entries.len(), 15);
        assert_eq!(board.total_active, 20);
        assert_eq!(board.entries[0].user_id, "user19");
        assert_eq!(board.entries[14].position, 15);
        assert!(board.entries.windows(2).all(|pair| pair[0].count >= pair[1].count));
        assert_eq!(board.entries[3].medal(), None);
    }
}
