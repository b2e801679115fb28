use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

pub const CONVERSATION_HEADER: &str = "x-conversation-id";

/// Conversations that currently have a request in flight.
#[derive(Clone, Debug, Default)]
pub struct BusyGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Held for the lifetime of a request; releases the conversation on drop.
pub struct BusyPermit {
    guard: BusyGuard,
    conversation: String,
}

impl BusyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, conversation: &str) -> Option<BusyPermit> {
        let mut set = self.in_flight.lock().expect("busy guard mutex poisoned");
        if !set.insert(conversation.to_string()) {
            return None;
        }
        Some(BusyPermit {
            guard: self.clone(),
            conversation: conversation.to_string(),
        })
    }

    pub fn is_busy(&self, conversation: &str) -> bool {
        self.in_flight
            .lock()
            .expect("busy guard mutex poisoned")
            .contains(conversation)
    }
}

impl Drop for BusyPermit {
    fn drop(&mut self) {
        if let Ok(mut set) = self.guard.in_flight.lock() {
            set.remove(&self.conversation);
        }
    }
}

/// Rejects a second concurrent request for the same conversation with 409.
/// Requests without a conversation header are not tracked.
pub async fn busy_middleware(
    State(guard): State<BusyGuard>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let conversation = req
        .headers()
        .get(CONVERSATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);

    let Some(conversation) = conversation else {
        return next.run(req).await;
    };

    let Some(_permit) = guard.try_acquire(&conversation) else {
        tracing::warn!(conversation = %conversation, "rejected request for busy conversation");
        return Error::Busy(format!(
            "a request for conversation {} is already in progress",
            conversation
        ))
        .into_response();
    };

    next.run(req).await
}
