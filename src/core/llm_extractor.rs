use crate::domain::ports::{CompletionService, PriceExtractor};
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts price information from Reddit posts. Only respond with the numeric price value or 'None'.";

const PING_SYSTEM_PROMPT: &str = "Respond with the word 'connected'";

static REPLY_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?").expect("reply number pattern is valid")
});

/// 擷取服務回覆的解讀結果
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    Price(Decimal),
    NoPrice,
    Unparseable,
    Ambiguous(Vec<Decimal>),
}

/// 委派給自然語言服務的價格擷取策略
pub struct LlmPriceExtractor<S: CompletionService> {
    service: S,
}

impl<S: CompletionService> LlmPriceExtractor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// 確認擷取服務可以連線並正確回應
    pub async fn verify_reachable(&self) -> bool {
        match self.service.complete(PING_SYSTEM_PROMPT, "Test connection").await {
            Ok(reply) => {
                let connected = reply.trim().trim_end_matches('.').eq_ignore_ascii_case("connected");
                if !connected {
                    tracing::warn!("Extraction service answered the connection test with: {:?}", reply);
                }
                connected
            }
            Err(e) => {
                tracing::warn!("Extraction service connection test failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl<S: CompletionService> PriceExtractor for LlmPriceExtractor<S> {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn extract(&self, title: &str, body: &str, item_name: &str) -> Result<Option<Decimal>> {
        let prompt = build_prompt(title, body, item_name);
        let reply = self.service.complete(SYSTEM_PROMPT, &prompt).await?;

        match parse_reply(&reply) {
            ReplyOutcome::Price(price) => Ok(Some(price)),
            ReplyOutcome::NoPrice => Ok(None),
            ReplyOutcome::Unparseable => {
                tracing::debug!("Could not read a price from extraction reply: {:?}", reply);
                Ok(None)
            }
            ReplyOutcome::Ambiguous(prices) => {
                tracing::debug!(
                    "Extraction reply named {} prices for '{}', ignoring: {:?}",
                    prices.len(),
                    item_name,
                    reply
                );
                Ok(None)
            }
        }
    }
}

pub fn build_prompt(title: &str, body: &str, item_name: &str) -> String {
    format!(
        "Extract the selling price for a {item} from this Reddit post.\n\
         If multiple prices are mentioned, determine which one corresponds to the {item}.\n\
         If a price range is given, use the lower price.\n\
         Only respond with the numeric price value (e.g., \"500\" or \"1200.50\").\n\
         If no clear price is found, respond with \"None\".\n\n\
         Post Title: {title}\n\
         Post Content: {body}",
        item = item_name,
        title = title,
        body = body,
    )
}

pub fn parse_reply(reply: &str) -> ReplyOutcome {
    let trimmed = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c.is_whitespace());

    if trimmed.eq_ignore_ascii_case("none") {
        return ReplyOutcome::NoPrice;
    }

    let mut prices: Vec<Decimal> = Vec::new();
    for m in REPLY_NUMBER.find_iter(trimmed) {
        let Ok(price) = Decimal::from_str(&m.as_str().replace(',', "")) else {
            continue;
        };
        if !prices.contains(&price) {
            prices.push(price);
        }
    }

    match prices.len() {
        0 => ReplyOutcome::Unparseable,
        1 => ReplyOutcome::Price(prices[0]),
        _ => ReplyOutcome::Ambiguous(prices),
    }
}
