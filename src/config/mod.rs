pub mod credentials;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_price_bounds, Validate,
};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

/// 價格擷取策略，於搜尋開始前決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Nearest price token to the item name
    Regex,
    /// Ask an OpenAI model (needs OPENAI_API_KEY)
    Llm,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "reddit-price-checker")]
#[command(about = "Check asking prices for an item across Reddit marketplace subreddits")]
pub struct CliConfig {
    /// Item to search for, e.g. "HD800" or "Sony A7III"
    #[arg(long)]
    pub item: Option<String>,

    #[arg(long)]
    pub min_price: Option<Decimal>,

    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Number of days to look back
    #[arg(long)]
    pub days: Option<u32>,

    #[arg(long, value_delimiter = ',')]
    pub subreddits: Vec<String>,

    #[arg(long, value_enum, default_value_t = Strategy::Regex)]
    pub strategy: Strategy,

    /// Maximum posts fetched per query
    #[arg(long)]
    pub limit: Option<usize>,

    /// Optional TOML profile
    #[arg(long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 品名與價格區間都有指定時不需要互動提問
    pub fn is_complete(&self) -> bool {
        self.item.is_some() && self.min_price.is_some() && self.max_price.is_some()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(item) = &self.item {
            validate_non_empty_string("item", item)?;
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            validate_price_bounds(min, max)?;
        }
        if let Some(limit) = self.limit {
            validate_positive_number("limit", limit, 1)?;
        }
        for subreddit in &self.subreddits {
            validate_non_empty_string("subreddits", subreddit)?;
        }
        Ok(())
    }
}
