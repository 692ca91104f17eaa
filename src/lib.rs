//! chat-rank crate
//!
//! Counts messages per member of each group chat and ranks members globally, for the current day and
//! for the current week. Counters live in memory, are written to one JSON file per group on a
//! background schedule, and are reloaded on first use.
//!
//! The building blocks, leaf to root:
//!
//! - [`buckets`]: day and week keys in a named time zone
//! - [`store`]: per-user counters, group tables, persistence and the dirty set
//! - [`ranking`]: leaderboard and rank profile views over a table
//! - [`engine`]: the shared [`engine::RankingEngine`] and its background flush
//! - [`chat`] and [`reports`]: chat command routing and reply text
//! - [`commands`]: the `chat-rank` command-line tool

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod buckets;
pub mod chat;
pub mod commands;
pub mod config;
pub mod engine;
pub mod filter;
pub mod ranking;
pub mod reports;
pub mod store;

pub use commands::{Host, run};
