//! Leaderboards and rank profiles computed from a group table.
//!
//! Both views rank users by descending count with a stable sort over the table's first-seen order, so
//! users with equal counts keep the order in which they first became active. Neither view mutates the
//! table: daily and weekly counters whose bucket is not the current one simply read as zero.

mod leaderboard;
mod medal;
mod mode;
mod profile;

pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardOutcome, build_leaderboard};
pub use medal::Medal;
pub use mode::LeaderboardMode;
pub use profile::{ProfileOutcome, RankAbove, RankBelow, RankProfile, build_profile};
