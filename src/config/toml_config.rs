use crate::adapters::openai::OpenAiSettings;
use crate::adapters::reddit::RedditSettings;
use crate::utils::error::{PriceCheckError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 選用的 TOML 設定檔
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub reddit: Option<RedditSection>,
    #[serde(default)]
    pub openai: Option<OpenAiSection>,
    #[serde(default)]
    pub search: Option<SearchSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditSection {
    pub user_agent: Option<String>,
    pub auth_url: Option<String>,
    pub api_base: Option<String>,
    pub result_limit: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiSection {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSection {
    pub default_subreddits: Option<Vec<String>>,
    pub days_back: Option<u32>,
}

impl ProfileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PriceCheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PriceCheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REDDIT_USER_AGENT})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PriceCheckError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(reddit) = &self.reddit {
            if let Some(url) = &reddit.auth_url {
                validate_url("reddit.auth_url", url)?;
            }
            if let Some(url) = &reddit.api_base {
                validate_url("reddit.api_base", url)?;
            }
            if let Some(user_agent) = &reddit.user_agent {
                validate_non_empty_string("reddit.user_agent", user_agent)?;
            }
            if let Some(limit) = reddit.result_limit {
                validate_positive_number("reddit.result_limit", limit, 1)?;
            }
            if let Some(timeout) = reddit.timeout_seconds {
                validate_positive_number("reddit.timeout_seconds", timeout as usize, 1)?;
            }
        }

        if let Some(openai) = &self.openai {
            if let Some(url) = &openai.api_base {
                validate_url("openai.api_base", url)?;
            }
            if let Some(model) = &openai.model {
                validate_non_empty_string("openai.model", model)?;
            }
            if let Some(max_tokens) = openai.max_tokens {
                validate_positive_number("openai.max_tokens", max_tokens as usize, 1)?;
            }
            if let Some(timeout) = openai.timeout_seconds {
                validate_positive_number("openai.timeout_seconds", timeout as usize, 1)?;
            }
        }

        if let Some(subreddits) = self.default_subreddits() {
            if subreddits.is_empty() {
                return Err(PriceCheckError::InvalidConfigValueError {
                    field: "search.default_subreddits".to_string(),
                    value: "[]".to_string(),
                    reason: "At least one subreddit is required".to_string(),
                });
            }
            for subreddit in subreddits {
                validate_non_empty_string("search.default_subreddits", subreddit)?;
            }
        }

        Ok(())
    }

    pub fn reddit_settings(&self) -> RedditSettings {
        let mut settings = RedditSettings::default();
        if let Some(reddit) = &self.reddit {
            if let Some(user_agent) = &reddit.user_agent {
                settings.user_agent = user_agent.clone();
            }
            if let Some(auth_url) = &reddit.auth_url {
                settings.auth_url = auth_url.trim_end_matches('/').to_string();
            }
            if let Some(api_base) = &reddit.api_base {
                settings.api_base = api_base.trim_end_matches('/').to_string();
            }
            if let Some(timeout) = reddit.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
        }
        settings
    }

    pub fn openai_settings(&self) -> OpenAiSettings {
        let mut settings = OpenAiSettings::default();
        if let Some(openai) = &self.openai {
            if let Some(model) = &openai.model {
                settings.model = model.clone();
            }
            if let Some(api_base) = &openai.api_base {
                settings.api_base = api_base.trim_end_matches('/').to_string();
            }
            if let Some(max_tokens) = openai.max_tokens {
                settings.max_tokens = max_tokens;
            }
            if let Some(timeout) = openai.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
        }
        settings
    }

    pub fn result_limit(&self) -> Option<usize> {
        self.reddit.as_ref().and_then(|r| r.result_limit)
    }

    pub fn default_subreddits(&self) -> Option<&[String]> {
        self.search
            .as_ref()
            .and_then(|s| s.default_subreddits.as_deref())
    }

    pub fn days_back(&self) -> Option<u32> {
        self.search.as_ref().and_then(|s| s.days_back)
    }
}

impl Validate for ProfileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
