use crate::Host;
use crate::Result;
use crate::chat::{ChatEvent, Dispatcher, OutgoingMessage};
use crate::commands::common::{CommonArgs, init_logging};
use crate::engine::{FlushTask, RankingEngine};
use camino::Utf8PathBuf;
use clap::Parser;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const LOG_TARGET: &str = "    ingest";

#[derive(Parser, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File of JSON chat events, one per line [default: standard input]
    #[arg(long, value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,
}

#[derive(Debug, Default)]
struct IngestStats {
    events: usize,
    replies: usize,
    skipped: usize,
}

/// Dispatch a stream of chat events, printing each reply as a JSON line
///
/// Counters are flushed in the background while the stream is read, and once more when it ends.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be read, or counters could
/// not be saved at the end of the stream
pub async fn ingest_events<H: Host>(host: &mut H, args: &IngestArgs) -> Result<()> {
    init_logging(args.common.log_level);
    let config = args.common.load_config(host)?;
    let engine = Arc::new(RankingEngine::from_config(&config)?);
    let dispatcher = Dispatcher::new(Arc::clone(&engine), &config);

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .into_app_err_with(|| format!("unable to open '{path}'"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let flusher = FlushTask::spawn(Arc::clone(&engine), Duration::from_millis(config.flush_interval_ms));
    let read_result = dispatch_lines(host, &dispatcher, reader).await;
    let summary = flusher.shutdown().await?;
    let stats = read_result?;

    log::info!(
        target: LOG_TARGET,
        "Processed {} event(s), wrote {} reply line(s), skipped {} line(s)",
        stats.events,
        stats.replies,
        stats.skipped
    );

    if !summary.failed.is_empty() {
        bail!(
            "unable to save counters for {} group(s) in {}: {}",
            summary.failed.len(),
            config.ranking_dir,
            summary.failed.join(", ")
        );
    }

    Ok(())
}

async fn dispatch_lines<H: Host>(
    host: &mut H,
    dispatcher: &Dispatcher,
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();
    let mut lines = reader.lines();
    let mut line_number = 0_usize;

    while let Some(line) = lines.next_line().await.into_app_err("unable to read chat events")? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: ChatEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping line {line_number}: {e}");
                stats.skipped += 1;
                continue;
            }
        };

        stats.events += 1;
        let chat_id = match &event {
            ChatEvent::Message(message) => &message.chat_id,
            ChatEvent::ParticipantsAdded(added) => &added.chat_id,
        };

        for text in dispatcher.dispatch(&event) {
            let reply = OutgoingMessage {
                chat_id: chat_id.clone(),
                text,
            };
            let json = serde_json::to_string(&reply).into_app_err("unable to encode reply")?;
            let _ = writeln!(host.output(), "{json}");
            stats.replies += 1;
        }
    }

    Ok(stats)
}
