use crate::config::{ChatProvider, Config};
use crate::error::{Error, Result};
use crate::models::chat_message::{ChatMessage, ChatRole};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant that creates educational quiz questions. Always follow the exact formatting requested for quiz questions.";
const TEXT_GENERATION_PREAMBLE: &str =
    "You are a helpful AI assistant that creates educational quiz questions.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Raw status and body of one call to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP to the completion service. `path` is relative to the configured base URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_json(&self, path: &str, payload: &JsonValue) -> Result<TransportResponse>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(api_key: String, base_url: Url, client: Client) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential(crate::config::CREDENTIAL_VAR.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            api_key,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Per-attempt timeout; the only one applied to chat requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post_json(&self, path: &str, payload: &JsonValue) -> Result<TransportResponse> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid chat endpoint '{}': {}", path, e)))?;

        tracing::debug!(%url, "sending chat request");
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// Request/response dialect spoken by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatProfile {
    /// OpenAI-style `chat/completions` with a messages array.
    ChatCompletions { model: String },
    /// Hugging Face inference: one flattened prompt, `generated_text` back.
    TextGeneration { model: String },
}

impl ChatProfile {
    pub fn for_provider(provider: ChatProvider, model: String) -> Self {
        match provider {
            ChatProvider::Groq => ChatProfile::ChatCompletions { model },
            ChatProvider::HuggingFace => ChatProfile::TextGeneration { model },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChatProfile::ChatCompletions { .. } => "chat_completions",
            ChatProfile::TextGeneration { .. } => "text_generation",
        }
    }

    /// How many trailing history entries go into a request.
    pub fn history_window(&self) -> usize {
        match self {
            ChatProfile::ChatCompletions { .. } => 10,
            ChatProfile::TextGeneration { .. } => 5,
        }
    }
}

/// Fixed-delay retry for transient statuses, bounded by `max_attempts` calls in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub rate_limit_delay: Duration,
    pub unavailable_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_delay: Duration::from_secs(2),
            unavailable_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying `status`, or `None` when the status is not transient.
    pub fn delay_for(&self, status: u16) -> Option<Duration> {
        match status {
            429 => Some(self.rate_limit_delay),
            503 => Some(self.unavailable_delay),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    stream: bool,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Serialize)]
struct TextGenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn ChatTransport>,
    profile: ChatProfile,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(transport: Arc<dyn ChatTransport>, profile: ChatProfile, retry: RetryPolicy) -> Self {
        Self {
            transport,
            profile,
            retry,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Result<Self> {
        let transport = HttpTransport::new(
            config.chat_api_key.clone(),
            config.chat_base_url.clone(),
            client,
        )?;
        let retry = RetryPolicy {
            max_attempts: config.chat_max_attempts,
            ..RetryPolicy::default()
        };
        Ok(Self::new(
            Arc::new(transport),
            ChatProfile::for_provider(config.chat_provider, config.chat_model.clone()),
            retry,
        ))
    }

    pub fn profile(&self) -> &ChatProfile {
        &self.profile
    }

    /// Sends `message` with the tail of `history` and returns the completion text.
    pub async fn send_message(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        let (path, payload) = self.build_request(message, history)?;

        let mut attempt = 1;
        loop {
            let res = self.transport.post_json(&path, &payload).await?;
            tracing::debug!(status = res.status, attempt, "chat response received");

            if res.is_success() {
                return self.extract_content(&res.body);
            }

            match self.retry.delay_for(res.status) {
                Some(delay) if attempt < self.retry.max_attempts => {
                    tracing::warn!(
                        status = res.status,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "transient chat API status, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                _ => {
                    tracing::error!(status = res.status, attempt, "chat API request failed");
                    return Err(Error::ExternalService {
                        status: res.status,
                        body: res.body,
                    });
                }
            }
        }
    }

    fn build_request(&self, message: &str, history: &[ChatMessage]) -> Result<(String, JsonValue)> {
        let window = self.profile.history_window();
        let recent = &history[history.len().saturating_sub(window)..];

        match &self.profile {
            ChatProfile::ChatCompletions { model } => {
                let mut messages = Vec::with_capacity(recent.len() + 2);
                messages.push(WireMessage {
                    role: ChatRole::System.as_str(),
                    content: SYSTEM_INSTRUCTION,
                });
                messages.extend(recent.iter().map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                }));
                messages.push(WireMessage {
                    role: ChatRole::User.as_str(),
                    content: message,
                });

                let body = ChatCompletionRequest {
                    model,
                    messages,
                    max_tokens: 1024,
                    temperature: 0.7,
                    top_p: 1.0,
                    stream: false,
                };
                Ok(("chat/completions".to_string(), serde_json::to_value(&body)?))
            }
            ChatProfile::TextGeneration { model } => {
                let mut prompt = format!("{}\n\n", TEXT_GENERATION_PREAMBLE);
                for m in recent {
                    let speaker = match m.role {
                        ChatRole::User => "Human",
                        _ => "Assistant",
                    };
                    prompt.push_str(&format!("{}: {}\n", speaker, m.content));
                }
                prompt.push_str(&format!("Human: {}\nAssistant:", message));

                let body = TextGenerationRequest {
                    inputs: prompt,
                    parameters: GenerationParameters {
                        max_new_tokens: 500,
                        temperature: 0.7,
                        do_sample: true,
                        return_full_text: false,
                    },
                };
                Ok((model.clone(), serde_json::to_value(&body)?))
            }
        }
    }

    fn extract_content(&self, body: &str) -> Result<String> {
        let content = match &self.profile {
            ChatProfile::ChatCompletions { .. } => {
                let parsed: ChatCompletionResponse = serde_json::from_str(body)
                    .map_err(|e| Error::MalformedResponse(format!("unexpected body: {}", e)))?;
                parsed
                    .choices
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::MalformedResponse("no choices returned".to_string()))?
                    .message
                    .and_then(|m| m.content)
                    .ok_or_else(|| {
                        Error::MalformedResponse("first choice has no message content".to_string())
                    })?
            }
            ChatProfile::TextGeneration { .. } => {
                let parsed: Vec<GeneratedText> = serde_json::from_str(body)
                    .map_err(|e| Error::MalformedResponse(format!("unexpected body: {}", e)))?;
                parsed
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::MalformedResponse("no generations returned".to_string()))?
                    .generated_text
            }
        };
        Ok(content.trim().to_string())
    }
}
