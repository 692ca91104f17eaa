//! Turning chat traffic into counted activity and command replies.

mod command;
mod dispatcher;
mod event;

pub use command::ChatCommand;
pub use dispatcher::Dispatcher;
pub use event::{ChatEvent, IncomingMessage, OutgoingMessage, Participant, ParticipantsAdded};

/// Suffix that marks a group chat address
pub const GROUP_SUFFIX: &str = "@g.us";

/// Whether a chat address belongs to a group
#[must_use]
pub fn is_group_chat(chat_id: &str) -> bool {
    chat_id.ends_with(GROUP_SUFFIX)
}
