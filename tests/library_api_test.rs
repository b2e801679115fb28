mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{delete, get, post_json, send, state_with, FakeTransport, THREE_QUESTIONS};
use quiz_assistant::router;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn classify_distinguishes_quiz_requests() {
    let app = router(state_with(Arc::new(FakeTransport::default())));

    let (status, body) = send(
        &app,
        post_json(
            "/api/quiz/classify",
            json!({ "text": "Generate 20 easy quiz questions on photosynthesis" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_quiz_request"], true);
    assert_eq!(body["request"]["question_count"], 10);
    assert_eq!(body["request"]["difficulty"], "easy");
    assert_eq!(body["request"]["question_type"], "multiple-choice");

    let (_, body) = send(
        &app,
        post_json("/api/quiz/classify", json!({ "text": "What time is it?" })),
    )
    .await;
    assert_eq!(body["is_quiz_request"], false);
    assert!(body["request"].is_null());
}

#[tokio::test]
async fn generate_without_save_leaves_library_untouched() {
    let app = router(state_with(Arc::new(FakeTransport::replying(&[THREE_QUESTIONS]))));

    let (status, body) = send(
        &app,
        post_json(
            "/api/quiz/generate",
            json!({ "topic": "space", "question_count": 2, "difficulty": "easy" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["questions"][0]["category"], "AI Generated");
    assert_eq!(body["questions"][0]["difficulty"], "easy");
    assert_eq!(body["questions"][0]["correct_answer"], "B");
    assert!(body["section"].is_null());

    let (_, sections) = send(&app, get("/api/sections")).await;
    assert!(sections.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn generate_rejects_out_of_range_counts() {
    let app = router(state_with(Arc::new(FakeTransport::default())));
    let (status, _) = send(
        &app,
        post_json(
            "/api/quiz/generate",
            json!({ "topic": "space", "question_count": 11 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn saved_quiz_can_be_exported_imported_and_studied() {
    let app = router(state_with(Arc::new(FakeTransport::replying(&[THREE_QUESTIONS]))));

    let (status, body) = send(
        &app,
        post_json(
            "/api/quiz/generate",
            json!({ "topic": "space", "question_count": 3, "save": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let section_id = body["section"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["section"]["name"], "Space Quiz");
    assert_eq!(body["section"]["color"], "#006F8D");

    let (status, section) = send(&app, get(&format!("/api/sections/{}", section_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(section["question_count"], 3);

    let (status, exported) = send(&app, get("/api/sections/export")).await;
    assert_eq!(status, StatusCode::OK);
    let questions = exported[0]["questions"].clone();

    let (status, imported) = send(
        &app,
        post_json(&format!("/api/sections/{}/import", section_id), questions),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(imported["question_count"], 6);

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/sections/{}/import", section_id),
            json!({ "not": "a list" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Bad request: Failed to import questions"));

    let (_, cards) = send(&app, get("/api/flashcards")).await;
    let card_id = cards[0]["id"].as_str().unwrap().to_string();

    let (status, card) = send(
        &app,
        post_json(&format!("/api/flashcards/{}/known", card_id), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["is_known"], true);
    assert_eq!(card["review_count"], 1);

    let (status, card) = send(
        &app,
        post_json(&format!("/api/flashcards/{}/practice", card_id), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["needs_practice"], true);
    assert_eq!(card["review_count"], 2);

    let (status, shuffled) = send(&app, post_json("/api/flashcards/shuffle", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shuffled.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn section_questions_can_be_removed_and_cleared() {
    let app = router(state_with(Arc::new(FakeTransport::replying(&[THREE_QUESTIONS]))));

    let (_, body) = send(
        &app,
        post_json(
            "/api/quiz/generate",
            json!({ "topic": "space", "question_count": 3, "save": true }),
        ),
    )
    .await;
    let section_id = body["section"]["id"].as_str().unwrap().to_string();

    let (status, section) = send(
        &app,
        delete(&format!("/api/sections/{}/questions/0", section_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(section["question_count"], 2);
    assert_eq!(
        section["questions"][0]["question_text"],
        "How many moons does Mars have?"
    );

    let (status, _) = send(
        &app,
        delete(&format!("/api/sections/{}/questions/5", section_id)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, section) = send(
        &app,
        delete(&format!("/api/sections/{}/questions", section_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(section["question_count"], 0);

    let (_, section) = send(&app, get(&format!("/api/sections/{}", section_id))).await;
    assert!(section["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blank_question_text_is_not_imported() {
    let app = router(state_with(Arc::new(FakeTransport::replying(&[THREE_QUESTIONS]))));
    let (_, body) = send(
        &app,
        post_json(
            "/api/quiz/generate",
            json!({ "topic": "space", "question_count": 3, "save": true }),
        ),
    )
    .await;
    let section_id = body["section"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/sections/{}/import", section_id),
            json!([{ "question_text": "  ", "options": ["1", "2", "3", "4"], "correct_answer": "A" }]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Bad request: Failed to import questions: question 0 has no text"
    );

    let (_, section) = send(&app, get(&format!("/api/sections/{}", section_id))).await;
    assert_eq!(section["question_count"], 3);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = router(state_with(Arc::new(FakeTransport::default())));
    let missing = Uuid::new_v4();

    let (status, _) = send(&app, get(&format!("/api/sections/{}", missing))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        post_json(&format!("/api/flashcards/{}/known", missing), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completion_events_reach_the_stats_summary() {
    let state = state_with(Arc::new(FakeTransport::default()));
    let _listener = state.stats_service.spawn_listener(&state.events);
    let app = router(state);

    let (status, body) = send(
        &app,
        post_json(
            "/api/stats/completions",
            json!({
                "section_name": "Space Quiz",
                "score": 4,
                "total_questions": 5,
                "total_quizzes": 1,
                "accuracy": 80.0,
                "difficulty": "medium"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["delivered"], 1);

    let mut summary = json!(null);
    for _ in 0..50 {
        let (_, body) = send(&app, get("/api/stats")).await;
        if body["total_quizzes_completed"] == 1 {
            summary = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(summary["total_quizzes_completed"], 1);
    assert_eq!(summary["total_questions_answered"], 5);
    assert_eq!(summary["total_points"], 200);
    assert_eq!(summary["recent_quizzes"][0]["section_name"], "Space Quiz");

    let rejected = [
        json!({ "section_name": "Broken", "score": 9, "total_questions": 5, "accuracy": 80.0 }),
        json!({ "section_name": "Broken", "score": 5, "total_questions": 5, "accuracy": 180.0 }),
        json!({ "section_name": "Broken", "score": 1, "total_questions": 5, "accuracy": -1.0 }),
        json!({
            "section_name": "Broken",
            "score": 3_000_000_000u32,
            "total_questions": 3_000_000_000u32,
            "accuracy": 100.0
        }),
    ];
    for event in rejected {
        let (status, body) = send(&app, post_json("/api/stats/completions", event)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }

    let (_, body) = send(&app, get("/api/stats")).await;
    assert_eq!(body["total_quizzes_completed"], 1);
}
