use crate::Host;
use crate::Result;
use crate::commands::common::{CommonArgs, init_logging};
use crate::engine::RankingEngine;
use crate::ranking::LeaderboardMode;
use crate::reports::render_leaderboard;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Group to rank
    #[arg(long, value_name = "ID")]
    pub group: String,

    /// Which counter to rank by
    #[arg(long, value_name = "MODE", default_value = "global")]
    pub mode: LeaderboardMode,

    /// Group name shown in the header
    #[arg(long, value_name = "NAME")]
    pub subject: Option<String>,
}

/// Print a group's leaderboard as the chat command would reply
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn show_leaderboard<H: Host>(host: &mut H, args: &LeaderboardArgs) -> Result<()> {
    init_logging(args.common.log_level);
    let config = args.common.load_config(host)?;
    let engine = RankingEngine::from_config(&config)?;

    let outcome = engine.leaderboard(&args.group, args.mode);
    let _ = writeln!(host.output(), "{}", render_leaderboard(&outcome, args.subject.as_deref()));
    Ok(())
}
