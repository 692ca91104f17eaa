use crate::ranking::{ProfileOutcome, RankAbove, RankBelow, RankProfile};
use crate::reports::{NO_DATA, NOT_RANKED, jid_to_number};
use core::fmt::{self, Write};

/// The reply for a rank profile query
#[must_use]
pub fn render_profile(outcome: &ProfileOutcome) -> String {
    let mut text = String::new();
    let _ = write_profile(&mut text, outcome);
    text
}

/// Write the reply for a rank profile query
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_profile<W: Write>(writer: &mut W, outcome: &ProfileOutcome) -> fmt::Result {
    match outcome {
        ProfileOutcome::NoData => write!(writer, "{NO_DATA}"),
        ProfileOutcome::NotRanked => write!(writer, "{NOT_RANKED}"),
        ProfileOutcome::Profile(profile) => write_ranked(writer, profile),
    }
}

fn write_ranked<W: Write>(writer: &mut W, profile: &RankProfile) -> fmt::Result {
    writeln!(writer, "👤 YOUR RANK PROFILE")?;
    writeln!(writer, "Stats for @{}", jid_to_number(&profile.user_id))?;
    writeln!(writer)?;

    if let Some(medal) = profile.medal() {
        write!(writer, "{} ", medal.emoji())?;
    }
    writeln!(writer, "🏆 Rank: #{} (of {})", profile.rank, profile.total_ranked)?;
    writeln!(writer, "🌐 Global: {} msgs", profile.global)?;
    writeln!(writer, "📅 Daily: {} msgs", profile.daily)?;
    writeln!(writer, "🗓️ Weekly: {} msgs", profile.weekly)?;
    writeln!(writer)?;

    writeln!(writer, "📊 Position Analysis:")?;
    match profile.above {
        RankAbove::Leader => writeln!(writer, "👑 You are the Leader! Keep it up!")?,
        RankAbove::Behind { rank_above, messages_needed } => {
            writeln!(writer, "🔼 Rank Up: Need {messages_needed} msgs to beat Top {rank_above}")?;
        }
    }

    match profile.below {
        RankBelow::Bottom => write!(writer, "🔽 Bottom: You are at the last rank."),
        RankBelow::Tied { rank_below } => write!(writer, "🔽 Safety: ⚠️ Tied! of Top {rank_below}"),
        RankBelow::Ahead { rank_below, lead } => write!(writer, "🔽 Safety: {lead} msgs ahead of Top {rank_below}"),
    }
}
