pub mod chat_message;
pub mod flashcard;
pub mod quiz_question;
pub mod quiz_request;
pub mod quiz_section;
pub mod quiz_stats;
