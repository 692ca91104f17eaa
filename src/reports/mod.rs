//! Chat replies rendered from ranking views.
//!
//! Each `render_*` function produces the complete text of one reply. The `write_*` variants target any
//! [`core::fmt::Write`] so callers can append to an existing buffer.

mod leaderboard;
mod menu;
mod profile;

pub use leaderboard::{render_leaderboard, write_leaderboard};
pub use menu::{render_menu, render_owner, render_unknown, render_welcome};
pub use profile::{render_profile, write_profile};

/// Shown when a group has no stored counters at all
pub const NO_DATA: &str = "📊 No messaging data recorded for this group yet.";

/// Shown to a user who has no counters in the group
pub const NOT_RANKED: &str = "📉 You haven't sent any messages yet. Start chatting to get ranked!";

/// Group name used when the chat's subject is unknown
pub const UNNAMED_GROUP: &str = "this group";

/// The phone number part of a chat address, `123@s.whatsapp.net` becomes `123`
#[must_use]
pub fn jid_to_number(jid: &str) -> &str {
    jid.split_once('@').map_or(jid, |(number, _)| number)
}
