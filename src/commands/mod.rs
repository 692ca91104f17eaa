//! Command-line interface for chat-rank
//!
//! The `run` function parses the arguments and routes to one handler per subcommand:
//!
//! - **init**: write the commented default configuration
//! - **validate**: load a configuration and report problems
//! - **record**: count one message and save it immediately
//! - **leaderboard** and **profile**: print the same replies the chat commands produce
//! - **ingest**: feed a stream of JSON chat events through the dispatcher, flushing in the background
//!
//! Every handler writes through a [`Host`] so tests can capture output and exit codes.

mod common;
mod host;
mod ingest;
mod init;
mod leaderboard;
mod profile;
mod record;
mod run;
mod validate;

pub use common::{CommonArgs, LogLevel};
pub use host::Host;
pub use ingest::{IngestArgs, ingest_events};
pub use init::{InitArgs, init_config};
pub use leaderboard::{LeaderboardArgs, show_leaderboard};
pub use profile::{ProfileArgs, show_profile};
pub use record::{RecordArgs, record_message};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};

#[cfg(test)]
pub(crate) use host::TestHost;
