use crate::models::chat_message::ChatMessage;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatPayload {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}
