use crate::chat::{ChatCommand, ChatEvent, IncomingMessage, ParticipantsAdded, is_group_chat};
use crate::config::Config;
use crate::engine::RankingEngine;
use crate::reports::{jid_to_number, render_leaderboard, render_menu, render_owner, render_profile, render_unknown, render_welcome};
use std::sync::Arc;

const LOG_TARGET: &str = "  dispatch";

/// Routes chat events to the ranking engine and renders the replies
#[derive(Debug, Clone)]
pub struct Dispatcher {
    engine: Arc<RankingEngine>,
    prefix: String,
    bot_name: String,
    owner_number: Option<String>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(engine: Arc<RankingEngine>, config: &Config) -> Self {
        Self {
            engine,
            prefix: config.command_prefix.clone(),
            bot_name: config.bot_name.clone(),
            owner_number: config.owner_number.clone(),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &Arc<RankingEngine> {
        &self.engine
    }

    /// Handle any chat event, returning the replies to send back
    #[must_use]
    pub fn dispatch(&self, event: &ChatEvent) -> Vec<String> {
        match event {
            ChatEvent::Message(message) => self.handle(message).into_iter().collect(),
            ChatEvent::ParticipantsAdded(added) => self.welcome(added),
        }
    }

    /// Count a group message and answer it if it is a command
    #[must_use]
    pub fn handle(&self, message: &IncomingMessage) -> Option<String> {
        let sender = message.sender();
        if is_group_chat(&message.chat_id) {
            self.engine.record_activity(&message.chat_id, sender, &message.body);
        }

        let command = ChatCommand::parse(&message.body, &self.prefix)?;
        log::debug!(target: LOG_TARGET, "{command:?} from {sender} in {}", message.chat_id);

        let reply = match command {
            ChatCommand::Menu => render_menu(&self.bot_name, &self.prefix),
            ChatCommand::Owner => render_owner(self.owner_number.as_deref()),
            ChatCommand::Leaderboard(mode) => {
                let outcome = self.engine.leaderboard(&message.chat_id, mode);
                render_leaderboard(&outcome, message.group_subject.as_deref())
            }
            ChatCommand::MyRank => render_profile(&self.engine.profile(&message.chat_id, sender)),
            ChatCommand::Unknown(word) => render_unknown(&word, &self.prefix),
        };

        Some(reply)
    }

    /// Greet each person added to a group
    #[must_use]
    pub fn welcome(&self, added: &ParticipantsAdded) -> Vec<String> {
        added
            .participants
            .iter()
            .map(|participant| {
                let name = participant
                    .name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| format!("@{}", jid_to_number(&participant.id)));
                render_welcome(&name, added.group_subject.as_deref(), &self.prefix)
            })
            .collect()
    }
}
