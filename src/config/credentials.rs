use crate::utils::error::{PriceCheckError, Result};
use std::fmt;

pub const REDDIT_ENV_VARS: [&str; 4] = [
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "REDDIT_USERNAME",
    "REDDIT_PASSWORD",
];

pub const OPENAI_ENV_VAR: &str = "OPENAI_API_KEY";

/// 載入 `.env`（若存在），不覆蓋已設定的環境變數
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl RedditCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 缺少的變數會一次全部列出
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values: Vec<Option<String>> = REDDIT_ENV_VARS
            .iter()
            .map(|key| read_trimmed(&lookup, key))
            .collect();

        for (key, value) in REDDIT_ENV_VARS.iter().zip(&values) {
            match value {
                Some(v) => tracing::info!("{}: ✓ Loaded (Length: {})", key, v.len()),
                None => tracing::info!("{}: ✗ Missing", key),
            }
        }

        let missing: Vec<String> = REDDIT_ENV_VARS
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PriceCheckError::MissingConfigError { fields: missing });
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        Ok(Self {
            client_id: next(),
            client_secret: next(),
            username: next(),
            password: next(),
        })
    }
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiCredentials {
    pub api_key: String,
}

impl OpenAiCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        read_trimmed(&lookup, OPENAI_ENV_VAR)
            .map(|api_key| Self { api_key })
            .ok_or_else(|| PriceCheckError::MissingConfigError {
                fields: vec![OPENAI_ENV_VAR.to_string()],
            })
    }
}

impl fmt::Debug for OpenAiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCredentials")
            .field("api_key", &"***")
            .finish()
    }
}

fn read_trimmed<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
