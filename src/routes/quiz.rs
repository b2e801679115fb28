use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

use crate::dto::quiz_dto::{ClassifyPayload, GenerateQuizPayload};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn classify(
    State(state): State<AppState>,
    Json(payload): Json<ClassifyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = state.ai_service.classify_and_extract(&payload.text);
    Ok(Json(json!({
        "is_quiz_request": request.is_some(),
        "request": request,
    })))
}

#[axum::debug_handler]
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = payload.to_request();
    let questions = state.ai_service.generate_quiz(&request).await?;

    let section = if payload.save && !questions.is_empty() {
        state.flashcard_service.add_from_questions(&questions).await;
        let section = state
            .section_service
            .add_section(&request.topic, request.difficulty.as_str())
            .await;
        Some(
            state
                .section_service
                .add_questions(section.id, &questions)
                .await?,
        )
    } else {
        None
    };

    Ok(Json(json!({
        "request": request,
        "count": questions.len(),
        "questions": questions,
        "section": section,
    })))
}
