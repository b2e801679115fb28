pub mod ai_service;
pub mod chat_client;
pub mod flashcard_service;
pub mod quiz_events;
pub mod quiz_extractor;
pub mod quiz_intent;
pub mod quiz_parser;
pub mod section_service;
pub mod stats_service;
