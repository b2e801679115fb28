use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::dto::chat_dto::{ChatPayload, ChatReply};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn send_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let reply = state
        .ai_service
        .send_chat(payload.message.trim(), &payload.history)
        .await?;
    Ok(Json(ChatReply { reply }))
}

#[axum::debug_handler]
pub async fn chat_turn(
    State(state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let turn = state
        .ai_service
        .chat_turn(
            &payload.message,
            &payload.history,
            &state.section_service,
            &state.flashcard_service,
        )
        .await;
    Ok(Json(turn))
}
