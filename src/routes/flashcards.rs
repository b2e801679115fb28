use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

pub async fn list_flashcards(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.flashcard_service.list().await))
}

pub async fn shuffle(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.flashcard_service.shuffle().await))
}

#[axum::debug_handler]
pub async fn mark_known(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.flashcard_service.mark_known(id).await?))
}

#[axum::debug_handler]
pub async fn mark_for_practice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.flashcard_service.mark_for_practice(id).await?))
}
