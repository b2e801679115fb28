use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

pub async fn list_sections(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.section_service.list().await))
}

#[axum::debug_handler]
pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.section_service.get(id).await?))
}

pub async fn export_sections(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = state.section_service.export_json().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Body is the raw JSON array of questions, so malformed input reaches the
/// import error path instead of the extractor's rejection.
#[axum::debug_handler]
pub async fn import_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<impl IntoResponse> {
    let section = state.section_service.import_questions(id, &body).await?;
    Ok(Json(section))
}

#[axum::debug_handler]
pub async fn remove_question(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.section_service.remove_question(id, index).await?))
}

#[axum::debug_handler]
pub async fn clear_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.section_service.clear_questions(id).await?))
}
