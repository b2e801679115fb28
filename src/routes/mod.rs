pub mod chat;
pub mod flashcards;
pub mod health;
pub mod quiz;
pub mod sections;
pub mod stats;
