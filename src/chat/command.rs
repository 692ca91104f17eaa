use crate::ranking::LeaderboardMode;

/// A command addressed to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Menu,
    Owner,
    Leaderboard(LeaderboardMode),
    MyRank,

    /// The lower-cased command word of an unrecognized command
    Unknown(String),
}

impl ChatCommand {
    /// Parse a message body, `None` unless it starts with `prefix`
    #[must_use]
    pub fn parse(body: &str, prefix: &str) -> Option<Self> {
        if body.is_empty() {
            return None;
        }

        let rest = body.strip_prefix(prefix)?;
        let mut parts = rest.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        Some(match command.as_str() {
            "menu" | "help" => Self::Menu,
            "owner" => Self::Owner,
            "ranking" | "global" | "daily" | "weekly" => Self::Leaderboard(LeaderboardMode::from_command(&command, &args)),
            "rank" | "myrank" => Self::MyRank,
            _ => Self::Unknown(command),
        })
    }
}
