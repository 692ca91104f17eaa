use crate::Host;
use crate::Result;
use crate::commands::common::{CommonArgs, init_logging};
use crate::engine::RankingEngine;
use crate::reports::render_profile;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Group to look in
    #[arg(long, value_name = "ID")]
    pub group: String,

    /// User whose rank to show
    #[arg(long, value_name = "ID")]
    pub user: String,
}

/// Print a user's rank profile as the chat command would reply
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn show_profile<H: Host>(host: &mut H, args: &ProfileArgs) -> Result<()> {
    init_logging(args.common.log_level);
    let config = args.common.load_config(host)?;
    let engine = RankingEngine::from_config(&config)?;

    let outcome = engine.profile(&args.group, &args.user);
    let _ = writeln!(host.output(), "{}", render_profile(&outcome));
    Ok(())
}
