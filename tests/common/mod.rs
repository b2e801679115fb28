#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use quiz_assistant::error::Result;
use quiz_assistant::services::chat_client::{
    ChatClient, ChatProfile, ChatTransport, RetryPolicy, TransportResponse,
};
use quiz_assistant::AppState;
use serde_json::{json, Value as JsonValue};
use tokio::sync::Notify;
use tower::ServiceExt;

pub const THREE_QUESTIONS: &str = "Question: Which planet is known as the Red Planet?\nA) Venus\nB) Mars\nC) Jupiter\nD) Saturn\nCorrect Answer: B\nExplanation: Iron oxide dust\n---\nQuestion: How many moons does Mars have?\nA) None\nB) One\nC) Two\nD) Four\nCorrect Answer: C\nExplanation: Phobos and Deimos\n---\nQuestion: What is the largest planet?\nA) Earth\nB) Mars\nC) Neptune\nD) Jupiter\nCorrect Answer: D\n---";

/// Scripted stand-in for the completion endpoint.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<TransportResponse>>,
    pub requests: Mutex<Vec<(String, JsonValue)>>,
    pub entered: Arc<Notify>,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn replying(contents: &[&str]) -> Self {
        let replies = contents
            .iter()
            .map(|c| TransportResponse {
                status: 200,
                body: json!({ "choices": [{ "message": { "content": c } }] }).to_string(),
            })
            .collect();
        Self {
            replies: Mutex::new(replies),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([TransportResponse {
                status,
                body: body.to_string(),
            }])),
            ..Self::default()
        }
    }

    /// Every call waits on `gate` before answering.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn post_json(&self, path: &str, payload: &JsonValue) -> Result<TransportResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), payload.clone()));
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.replies.lock().unwrap().pop_front();
        Ok(next.unwrap_or(TransportResponse {
            status: 500,
            body: "no scripted reply left".into(),
        }))
    }
}

pub fn state_with(transport: Arc<FakeTransport>) -> AppState {
    let client = ChatClient::new(
        transport,
        ChatProfile::ChatCompletions {
            model: "test-model".into(),
        },
        RetryPolicy::default(),
    );
    AppState::with_chat_client(client, None)
}

pub fn post_json(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
