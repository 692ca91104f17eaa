use serde::{Deserialize, Serialize};

/// Something that happened in a chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChatEvent {
    Message(IncomingMessage),
    ParticipantsAdded(ParticipantsAdded),
}

/// A text message received in a chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IncomingMessage {
    /// Address of the chat the message was sent in
    pub chat_id: String,

    /// Address of the author, absent in one-to-one chats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,

    /// Message text or media caption
    #[serde(default)]
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_subject: Option<String>,
}

impl IncomingMessage {
    /// The author's address, which is the chat itself in one-to-one chats
    #[must_use]
    pub fn sender(&self) -> &str {
        self.sender_id.as_deref().unwrap_or(&self.chat_id)
    }
}

/// People added to a group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParticipantsAdded {
    pub chat_id: String,
    pub participants: Vec<Participant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Participant {
    pub id: String,

    /// Display name, when the contact has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A reply to send back to a chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutgoingMessage {
    pub chat_id: String,
    pub text: String,
}
