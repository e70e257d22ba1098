use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceCheckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("OpenAI request failed: {0}")]
    OpenAiError(#[from] async_openai::error::OpenAIError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {}", fields.join(", "))]
    MissingConfigError { fields: Vec<String> },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Rate limited by {service}")]
    RateLimited { service: String },

    #[error("Listing source error for r/{subreddit}: {message}")]
    SourceError { subreddit: String, message: String },

    #[error("Extraction service error: {message}")]
    ExtractionServiceError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, PriceCheckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceCheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_)
            | Self::OpenAiError(_)
            | Self::RateLimited { .. }
            | Self::SourceError { .. }
            | Self::ExtractionServiceError { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::AuthError { .. } => ErrorCategory::Authentication,
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一子版或單一貼文的失敗，搜尋仍會繼續
            Self::RateLimited { .. }
            | Self::SourceError { .. }
            | Self::ExtractionServiceError { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::OpenAiError(_) => ErrorSeverity::Medium,
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::AuthError { .. }
            | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingConfigError { fields } => format!(
                "Set {} in your environment or in a .env file",
                fields.join(", ")
            ),
            Self::InvalidConfigValueError { field, .. }
            | Self::ConfigValidationError { field, .. } => {
                format!("Check the value of '{}'", field)
            }
            Self::ConfigError { .. } => "Check the configuration file and CLI flags".to_string(),
            Self::AuthError { .. } => "Verify your Reddit password in a browser and make sure the app credentials match https://www.reddit.com/prefs/apps exactly (no extra spaces)".to_string(),
            Self::RateLimited { .. } => "Wait a few minutes before searching again".to_string(),
            Self::ApiError(_) | Self::SourceError { .. } => {
                "Check your network connection and that the subreddit exists".to_string()
            }
            Self::OpenAiError(_) | Self::ExtractionServiceError { .. } => {
                "Check OPENAI_API_KEY or use --strategy regex".to_string()
            }
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Run again with --verbose and inspect the logs".to_string()
            }
            Self::IoError(_) => "Check file permissions and paths".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Authentication => format!("Could not sign in: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
