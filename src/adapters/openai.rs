use crate::domain::ports::CompletionService;
use crate::utils::error::{PriceCheckError, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            max_tokens: 10,
            timeout_seconds: 30,
        }
    }
}

/// OpenAI chat completions 作為價格擷取服務
pub struct OpenAiCompletionService {
    client: Client<OpenAIConfig>,
    settings: OpenAiSettings,
}

impl OpenAiCompletionService {
    pub fn new(api_key: &str, settings: OpenAiSettings) -> Self {
        tracing::debug!(
            "Initializing OpenAI client: model={}, api_base={}",
            settings.model,
            settings.api_base
        );

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&settings.api_base);

        Self {
            client: Client::with_config(config),
            settings,
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        // 固定 temperature 0 讓回覆可重現
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.settings.model.as_str())
            .messages(messages)
            .temperature(0.0)
            .max_tokens(self.settings.max_tokens)
            .build()?;

        let response = tokio::time::timeout(
            Duration::from_secs(self.settings.timeout_seconds),
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| PriceCheckError::ExtractionServiceError {
            message: format!(
                "request timed out after {}s",
                self.settings.timeout_seconds
            ),
        })??;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .ok_or_else(|| PriceCheckError::ExtractionServiceError {
                message: "empty response from extraction service".to_string(),
            })
    }
}
