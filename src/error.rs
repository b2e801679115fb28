use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

/// Longest error text ever shown to a user.
pub const MAX_USER_MESSAGE_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat API credential is not configured. Set {0} in the environment.")]
    MissingCredential(String),

    #[error("Chat API error {status}: {body}")]
    ExternalService { status: u16, body: String },

    #[error("Malformed chat API response: {0}")]
    MalformedResponse(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conversation is busy: {0}")]
    Busy(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short human-readable text safe to put in front of a user.
    pub fn user_message(&self) -> String {
        crate::utils::text::truncate_chars(&self.to_string(), MAX_USER_MESSAGE_CHARS)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Error::BadRequest(_) | Error::Validation(_) | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Busy(_) => StatusCode::CONFLICT,
            Error::ExternalService { .. } | Error::MalformedResponse(_) | Error::Reqwest(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) | Error::MissingCredential(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Anyhow(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = match &self {
            Error::Anyhow(_) | Error::Io(_) => {
                tracing::error!(error = ?self, "request failed");
                "An unexpected error occurred".to_string()
            }
            other => other.user_message(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
