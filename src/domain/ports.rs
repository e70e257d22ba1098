use crate::domain::model::Post;
use crate::utils::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// 送往 Listing Source 的一次搜尋
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub text: String,
    pub time_filter: &'static str,
    pub limit: usize,
}

/// 提供貼文的外部來源；驗證與分頁由實作負責
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self, subreddit: &str, query: &SourceQuery) -> Result<Vec<Post>>;
}

/// 價格擷取策略
///
/// 回傳 `Ok(None)` 表示找不到價格；`Err` 只用於傳輸或授權等例外狀況，
/// 由呼叫端轉為略過該篇貼文。
#[async_trait]
pub trait PriceExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, title: &str, body: &str, item_name: &str) -> Result<Option<Decimal>>;
}

/// 自然語言擷取服務：送出提示詞，取回自由文字
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}
