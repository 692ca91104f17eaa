//! Command dispatch logic for chat-rank

use super::{
    IngestArgs, InitArgs, LeaderboardArgs, ProfileArgs, RecordArgs, ValidateArgs, ingest_events, init_config, record_message,
    show_leaderboard, show_profile, validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "chat-rank", version, author, long_about = None)]
#[command(about = "Count group chat activity and rank members")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ChatRankSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChatRankSubcommand {
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// Count one message from a user in a group
    Record(RecordArgs),
    /// Show a group's leaderboard
    Leaderboard(LeaderboardArgs),
    /// Show a user's rank profile
    Profile(ProfileArgs),
    /// Process JSON chat events from a file or standard input
    Ingest(IngestArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        ChatRankSubcommand::Init(init_args) => init_config(host, init_args),
        ChatRankSubcommand::Validate(validate_args) => validate_config(host, validate_args),
        ChatRankSubcommand::Record(record_args) => record_message(host, record_args),
        ChatRankSubcommand::Leaderboard(leaderboard_args) => show_leaderboard(host, leaderboard_args),
        ChatRankSubcommand::Profile(profile_args) => show_profile(host, profile_args),
        ChatRankSubcommand::Ingest(ingest_args) => ingest_events(host, ingest_args).await,
    }
}
