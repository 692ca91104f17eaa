//! End-to-end behavior of the ranking engine over in-memory and on-disk storage.

use chat_rank::buckets::{BucketCalendar, Clock, ManualClock};
use chat_rank::engine::RankingEngine;
use chat_rank::ranking::{LeaderboardMode, LeaderboardOutcome, ProfileOutcome, RankAbove, RankBelow};
use chat_rank::store::{JsonFileStore, MemoryStore, TablePersistence};
use chrono::{TimeDelta, TimeZone, Utc};
use std::sync::Arc;

const GROUP: &str = "120363000000000000@g.us";
const A: &str = "111@s.whatsapp.net";
const B: &str = "222@s.whatsapp.net";
const C: &str = "333@s.whatsapp.net";

fn clock() -> Arc<ManualClock> {
    // 11:30 in Colombo on a Friday
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()))
}

fn engine(persistence: Arc<dyn TablePersistence>, clock: &Arc<ManualClock>) -> RankingEngine {
    let clock = Arc::clone(clock) as Arc<dyn Clock>;
    RankingEngine::new(persistence, BucketCalendar::new(chrono_tz::Asia::Colombo)).with_clock(clock)
}

fn send(engine: &RankingEngine, user: &str, count: usize) {
    for _ in 0..count {
        engine.record_activity(GROUP, user, "hello everyone");
    }
}

#[test]
fn test_three_member_group() {
    let clock = clock();
    let engine = engine(Arc::new(MemoryStore::new()), &clock);
    send(&engine, A, 10);
    send(&engine, B, 7);
    send(&engine, C, 7);

    let LeaderboardOutcome::Ranked(board) = engine.leaderboard(GROUP, LeaderboardMode::Global) else {
        panic!("expected a leaderboard");
    };
    let order: Vec<_> = board.entries.iter().map(|e| (e.user_id.as_str(), e.count)).collect();
    assert_eq!(order, [(A, 10), (B, 7), (C, 7)]);
    assert_eq!(board.total_active, 3);

    let ProfileOutcome::Profile(profile) = engine.profile(GROUP, B) else {
        panic!("expected a profile");
    };
    assert_eq!(profile.rank, 2);
    assert_eq!(profile.total_ranked, 3);
    assert_eq!(
        profile.above,
        RankAbove::Behind {
            rank_above: 1,
            messages_needed: 4
        }
    );
    assert_eq!(profile.below, RankBelow::Tied { rank_below: 3 });

    assert_eq!(engine.profile(GROUP, "999@s.whatsapp.net"), ProfileOutcome::NotRanked);
}

#[test]
fn test_daily_board_forgets_yesterday() {
    let clock = clock();
    let engine = engine(Arc::new(MemoryStore::new()), &clock);
    send(&engine, A, 3);

    clock.advance(TimeDelta::days(1));
    assert_eq!(
        engine.leaderboard(GROUP, LeaderboardMode::Daily),
        LeaderboardOutcome::NoActive(LeaderboardMode::Daily)
    );
    assert!(matches!(engine.leaderboard(GROUP, LeaderboardMode::Weekly), LeaderboardOutcome::Ranked(_)));

    send(&engine, B, 1);
    let LeaderboardOutcome::Ranked(board) = engine.leaderboard(GROUP, LeaderboardMode::Daily) else {
        panic!("expected a leaderboard");
    };
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].user_id, B);
    assert_eq!(board.total_active, 1);

    // the stale bucket is reported as zero but left untouched in storage
    let stats = engine.user_stats(GROUP, A).unwrap();
    assert_eq!(stats.daily.count, 3);
    assert_eq!(stats.daily.day_key, "2024-03-01");
}

#[test]
fn test_week_rollover_keeps_global() {
    let clock = clock();
    let engine = engine(Arc::new(MemoryStore::new()), &clock);
    send(&engine, A, 5);

    clock.advance(TimeDelta::days(7));
    send(&engine, A, 1);

    let stats = engine.user_stats(GROUP, A).unwrap();
    assert_eq!(stats.global, 6);
    assert_eq!(stats.weekly.count, 1);
    assert_eq!(stats.daily.count, 1);
}

#[test]
fn test_flush_and_reload_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let clock = clock();

    let first = engine(Arc::new(JsonFileStore::new(tmp.path())), &clock);
    send(&first, A, 2);
    send(&first, B, 5);
    let summary = first.flush_all();
    assert_eq!(summary.written, [GROUP]);

    let text = std::fs::read_to_string(tmp.path().join(format!("{GROUP}.json"))).unwrap();
    assert!(text.contains("\"dayKey\": \"2024-03-01\""));
    assert!(text.contains("\"weekKey\": \"2024-09\""));

    let second = engine(Arc::new(JsonFileStore::new(tmp.path())), &clock);
    assert_eq!(second.table_snapshot(GROUP), first.table_snapshot(GROUP));

    let LeaderboardOutcome::Ranked(board) = second.leaderboard(GROUP, LeaderboardMode::Daily) else {
        panic!("expected a leaderboard");
    };
    assert_eq!(board.entries[0].user_id, B);
    assert_eq!(board.entries[0].count, 5);
}

#[test]
fn test_reads_files_from_earlier_versions() {
    let tmp = tempfile::tempdir().unwrap();
    let existing = r#"{
  "111@s.whatsapp.net": {
    "global": 40,
    "daily": { "count": 2, "dayKey": "2024-03-01" },
    "weekly": { "count": 9, "weekKey": "2024-09" }
  },
  "222@s.whatsapp.net": {
    "global": 12
  }
}"#;
    std::fs::write(tmp.path().join(format!("{GROUP}.json")), existing).unwrap();

    let clock = clock();
    let engine = engine(Arc::new(JsonFileStore::new(tmp.path())), &clock);

    let LeaderboardOutcome::Ranked(board) = engine.leaderboard(GROUP, LeaderboardMode::Weekly) else {
        panic!("expected a leaderboard");
    };
    assert_eq!(board.total_active, 1);
    assert_eq!(board.entries[0].count, 9);

    let ProfileOutcome::Profile(profile) = engine.profile(GROUP, B) else {
        panic!("expected a profile");
    };
    assert_eq!(profile.rank, 2);
    assert_eq!(profile.daily, 0);
    assert_eq!(
        profile.above,
        RankAbove::Behind {
            rank_above: 1,
            messages_needed: 29
        }
    );
}

#[test]
fn test_corrupt_file_is_replaced() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(format!("{GROUP}.json"));
    std::fs::write(&path, "{ not json").unwrap();

    let clock = clock();
    let engine = engine(Arc::new(JsonFileStore::new(tmp.path())), &clock);
    assert_eq!(engine.profile(GROUP, A), ProfileOutcome::NotRanked);

    send(&engine, A, 1);
    let _ = engine.flush_all();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(A));
}

#[test]
fn test_unwritable_directory_keeps_group_dirty() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let clock = clock();
    let engine = engine(Arc::new(JsonFileStore::new(&blocker)), &clock);
    send(&engine, A, 1);

    let summary = engine.flush_all();
    assert_eq!(summary.failed, [GROUP]);
    assert!(engine.is_dirty(GROUP));
    assert_eq!(engine.user_stats(GROUP, A).unwrap().global, 1);
}

#[test]
fn test_concurrent_recording() {
    let clock = clock();
    let engine = Arc::new(engine(Arc::new(MemoryStore::new()), &clock));

    let handles: Vec<_> = [A, B, C]
        .into_iter()
        .map(|user| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    engine.record_activity(GROUP, user, "hi");
                    if user == A {
                        let _ = engine.flush_all();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    let _ = engine.flush_all();

    for user in [A, B, C] {
        assert_eq!(engine.user_stats(GROUP, user).unwrap().global, 200);
    }
    assert!(!engine.is_dirty(GROUP));
}
