use crate::Host;
use crate::Result;
use crate::commands::common::{CommonArgs, init_logging};
use crate::engine::RankingEngine;
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct RecordArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Group the message was sent in
    #[arg(long, value_name = "ID")]
    pub group: String,

    /// Author of the message
    #[arg(long, value_name = "ID")]
    pub user: String,

    /// Message text, checked against the system message pattern
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub text: String,
}

/// Count one message and save the group right away
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the counters cannot be saved
pub fn record_message<H: Host>(host: &mut H, args: &RecordArgs) -> Result<()> {
    init_logging(args.common.log_level);
    let config = args.common.load_config(host)?;
    let engine = RankingEngine::from_config(&config)?;

    engine.record_activity(&args.group, &args.user, &args.text);
    if !engine.is_dirty(&args.group) {
        let _ = writeln!(host.output(), "Not counted: the text looks like bot or system output");
        return Ok(());
    }

    let summary = engine.flush_all();
    if !summary.failed.is_empty() {
        bail!("unable to save counters for group {} in {}", args.group, config.ranking_dir);
    }

    if let Some(stats) = engine.user_stats(&args.group, &args.user) {
        let keys = engine.current_keys();
        let _ = writeln!(
            host.output(),
            "Recorded message from {} in {}: {} total, {} today, {} this week",
            args.user,
            args.group,
            stats.global,
            stats.daily_count(&keys),
            stats.weekly_count(&keys)
        );
    }

    Ok(())
}
