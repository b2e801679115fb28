use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::quiz_stats::QuizStats;
use crate::AppState;

const MAX_QUESTIONS_PER_QUIZ: u32 = 1_000;

fn check_event(event: &QuizStats) -> Result<()> {
    if event.total_questions > MAX_QUESTIONS_PER_QUIZ {
        return Err(Error::BadRequest(format!(
            "total_questions cannot exceed {}",
            MAX_QUESTIONS_PER_QUIZ
        )));
    }
    if event.score > event.total_questions {
        return Err(Error::BadRequest(
            "score cannot exceed total_questions".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&event.accuracy) {
        return Err(Error::BadRequest(
            "accuracy must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn publish_completion(
    State(state): State<AppState>,
    Json(event): Json<QuizStats>,
) -> Result<impl IntoResponse> {
    check_event(&event)?;
    let delivered = state.events.publish(event);
    Ok((StatusCode::ACCEPTED, Json(json!({ "delivered": delivered }))))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.stats_service.summary().await))
}
