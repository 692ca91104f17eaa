//! The ranking engine: counting activity, answering ranking queries, and writing counters back.
//!
//! [`RankingEngine`] ties together the group registry, the dirty set, the bucket calendar and the
//! message filter. It is `Send + Sync` and meant to be shared behind an `Arc` between whatever feeds
//! it messages and a [`FlushTask`] that periodically persists dirty groups.

mod flush_task;
mod ranking_engine;

pub use flush_task::FlushTask;
pub use ranking_engine::{DEFAULT_LEADERBOARD_SIZE, FlushSummary, RankingEngine};
