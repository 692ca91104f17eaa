use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which counter drives a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, ValueEnum, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMode {
    /// All-time message count
    #[default]
    Global,
    /// Messages sent today
    Daily,
    /// Messages sent this week
    Weekly,
}

impl LeaderboardMode {
    /// Pick the mode for a chat command and its arguments
    ///
    /// Either the command word or the arguments mentioning `daily` (checked first) or `weekly` selects
    /// that mode; anything else ranks by global count.
    #[must_use]
    pub fn from_command(command: &str, args: &[&str]) -> Self {
        let command = command.to_lowercase();
        let text = args.join(" ").to_lowercase();

        if command.contains("daily") || text.contains("daily") {
            Self::Daily
        } else if command.contains("weekly") || text.contains("weekly") {
            Self::Weekly
        } else {
            Self::Global
        }
    }
}
