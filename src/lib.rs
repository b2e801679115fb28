pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::busy::{busy_middleware, BusyGuard};
use crate::services::{
    ai_service::AIService, chat_client::ChatClient, flashcard_service::FlashcardService,
    quiz_events::QuizEventBus, section_service::SectionService, stats_service::StatsService,
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use reqwest::Client;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub ai_service: AIService,
    pub section_service: SectionService,
    pub flashcard_service: FlashcardService,
    pub stats_service: StatsService,
    pub events: QuizEventBus,
    pub busy: BusyGuard,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder().build()?;
        let chat_client = ChatClient::from_config(config, http_client)?;
        Ok(Self::with_chat_client(chat_client, config.stats_file.clone()))
    }

    /// State around an already-built chat client; tests pass one over a fake transport.
    pub fn with_chat_client(chat_client: ChatClient, stats_file: Option<PathBuf>) -> Self {
        Self {
            ai_service: AIService::new(chat_client),
            section_service: SectionService::new(),
            flashcard_service: FlashcardService::new(),
            stats_service: StatsService::new(stats_file),
            events: QuizEventBus::new(),
            busy: BusyGuard::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let chat_api = Router::new()
        .route("/api/chat", post(routes::chat::send_chat))
        .route("/api/chat/turn", post(routes::chat::chat_turn))
        .route("/api/quiz/generate", post(routes::quiz::generate))
        .layer(axum::middleware::from_fn_with_state(
            state.busy.clone(),
            busy_middleware,
        ));

    let library_api = Router::new()
        .route("/api/quiz/classify", post(routes::quiz::classify))
        .route("/api/sections", get(routes::sections::list_sections))
        .route("/api/sections/export", get(routes::sections::export_sections))
        .route("/api/sections/:id", get(routes::sections::get_section))
        .route(
            "/api/sections/:id/import",
            post(routes::sections::import_questions),
        )
        .route(
            "/api/sections/:id/questions",
            delete(routes::sections::clear_questions),
        )
        .route(
            "/api/sections/:id/questions/:index",
            delete(routes::sections::remove_question),
        )
        .route("/api/flashcards", get(routes::flashcards::list_flashcards))
        .route("/api/flashcards/shuffle", post(routes::flashcards::shuffle))
        .route(
            "/api/flashcards/:id/known",
            post(routes::flashcards::mark_known),
        )
        .route(
            "/api/flashcards/:id/practice",
            post(routes::flashcards::mark_for_practice),
        )
        .route(
            "/api/stats/completions",
            post(routes::stats::publish_completion),
        )
        .route("/api/stats", get(routes::stats::get_stats));

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(chat_api)
        .merge(library_api)
        .with_state(state)
}
