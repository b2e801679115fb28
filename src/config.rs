use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use url::Url;

pub const CREDENTIAL_VAR: &str = "CHAT_API_KEY";

/// Which flavour of completion endpoint the chat client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatProvider {
    /// OpenAI-compatible `/chat/completions` (Groq by default).
    Groq,
    /// Hugging Face text-generation inference.
    HuggingFace,
}

impl ChatProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            ChatProvider::Groq => "https://api.groq.com/openai/v1/",
            ChatProvider::HuggingFace => "https://api-inference.huggingface.co/models/",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ChatProvider::Groq => "llama3-8b-8192",
            ChatProvider::HuggingFace => "microsoft/DialoGPT-medium",
        }
    }
}

impl FromStr for ChatProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" | "openai" => Ok(ChatProvider::Groq),
            "huggingface" | "hf" => Ok(ChatProvider::HuggingFace),
            other => Err(format!("unknown chat provider '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub chat_api_key: String,
    pub chat_provider: ChatProvider,
    pub chat_base_url: Url,
    pub chat_model: String,
    pub chat_max_attempts: u32,
    pub stats_file: Option<PathBuf>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let chat_api_key = get(CREDENTIAL_VAR)
            .ok_or_else(|| Error::MissingCredential(CREDENTIAL_VAR.to_string()))?;

        let chat_provider = match get("CHAT_PROVIDER") {
            Some(raw) => parse_value("CHAT_PROVIDER", &raw)?,
            None => ChatProvider::Groq,
        };

        let base_url = get("CHAT_BASE_URL")
            .unwrap_or_else(|| chat_provider.default_base_url().to_string());
        let chat_base_url = Url::parse(&with_trailing_slash(&base_url))
            .map_err(|e| Error::Config(format!("Invalid value for CHAT_BASE_URL: {}", e)))?;

        let chat_max_attempts: u32 = match get("CHAT_MAX_ATTEMPTS") {
            Some(raw) => parse_value("CHAT_MAX_ATTEMPTS", &raw)?,
            None => 3,
        };
        if chat_max_attempts == 0 {
            return Err(Error::Config(
                "CHAT_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            server_address: get("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            chat_api_key,
            chat_provider,
            chat_base_url,
            chat_model: get("CHAT_MODEL")
                .unwrap_or_else(|| chat_provider.default_model().to_string()),
            chat_max_attempts,
            stats_file: get("STATS_FILE").map(PathBuf::from),
        })
    }
}

fn with_trailing_slash(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
