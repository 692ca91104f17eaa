//! Count group chat activity and rank members.
//!
//! # Quick Start
//!
//! ```bash
//! chat-rank init
//! chat-rank record --group 1203630@g.us --user 9477@s.whatsapp.net --text "hello"
//! chat-rank leaderboard --group 1203630@g.us --mode daily
//! chat-rank profile --group 1203630@g.us --user 9477@s.whatsapp.net
//! ```
//!
//! Feed a live stream of chat events, one JSON object per line, and read the replies from stdout:
//!
//! ```bash
//! my-bridge | chat-rank ingest --log-level info
//! ```
//!
//! ```json
//! {"event":"message","chat_id":"1203630@g.us","sender_id":"9477@s.whatsapp.net","body":".myrank"}
//! {"event":"participants_added","chat_id":"1203630@g.us","participants":[{"id":"9478@s.whatsapp.net"}]}
//! ```

use chat_rank::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that runs real OS commands.
#[derive(Debug, Clone, Default)]
struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
