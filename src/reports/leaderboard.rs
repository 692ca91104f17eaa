use crate::ranking::{Leaderboard, LeaderboardOutcome};
use crate::reports::{NO_DATA, UNNAMED_GROUP, jid_to_number};
use core::fmt::{self, Write};

/// The reply for a leaderboard query
#[must_use]
pub fn render_leaderboard(outcome: &LeaderboardOutcome, group_subject: Option<&str>) -> String {
    let mut text = String::new();
    let _ = write_leaderboard(&mut text, outcome, group_subject);
    text
}

/// Write the reply for a leaderboard query
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_leaderboard<W: Write>(writer: &mut W, outcome: &LeaderboardOutcome, group_subject: Option<&str>) -> fmt::Result {
    match outcome {
        LeaderboardOutcome::NoData => write!(writer, "{NO_DATA}"),
        LeaderboardOutcome::NoActive(mode) => write!(writer, "📉 No active messages found for {mode} ranking yet."),
        LeaderboardOutcome::Ranked(board) => write_ranked(writer, board, group_subject),
    }
}

fn write_ranked<W: Write>(writer: &mut W, board: &Leaderboard, group_subject: Option<&str>) -> fmt::Result {
    let mode = board.mode.to_string().to_uppercase();
    let subject = group_subject.filter(|s| !s.is_empty()).unwrap_or(UNNAMED_GROUP);

    writeln!(writer, "🏆 {mode} CHAT RANKING")?;
    writeln!(writer, "Top active members in {subject}")?;
    writeln!(writer)?;

    for entry in &board.entries {
        let number = jid_to_number(&entry.user_id);
        match entry.medal() {
            Some(medal) => writeln!(writer, "{} @{number} : {}", medal.emoji(), entry.count)?,
            None => writeln!(writer, "{}. @{number} : {}", entry.position, entry.count)?,
        }
    }

    write!(writer, "\n_Total active users: {}_", board.total_active)
}
