use crate::utils::error::{PriceCheckError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 從 Listing Source 取得的單篇貼文，取得後不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub subreddit: String,
    pub author: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub score: i64,
    pub url: String,
    pub permalink: String,
}

impl Post {
    /// 標題與內文合併後的全文，供型號比對使用
    pub fn text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// 使用者輸入的型號查詢
///
/// `variant_pattern` 會連同緊接在型號後面的英數字一起比對，
/// 比對結果帶有後綴（例如 "HD800" 之於 "HD800S"）即視為變體，不算命中。
/// 型號字詞的 pattern 另外要求前一個字元不是英數字，避免 "R5" 命中 "GR5"。
#[derive(Debug, Clone)]
pub struct ModelQuery {
    base_name: String,
    variant_pattern: Regex,
    model_token: Option<(String, Regex)>,
}

impl ModelQuery {
    pub fn new(input: &str) -> Result<Self> {
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.is_empty() {
            return Err(PriceCheckError::InvalidConfigValueError {
                field: "item".to_string(),
                value: input.to_string(),
                reason: "Item name cannot be empty".to_string(),
            });
        }

        let base_name = words.join(" ");
        let variant_pattern = Self::build_pattern(&words, false)?;

        // 多字查詢（"Sennheiser HD800"）另外以最後一個字作為型號
        let model_token = match words.as_slice() {
            [_, .., last] => Some((last.to_string(), Self::build_pattern(&[*last], true)?)),
            _ => None,
        };

        Ok(Self {
            base_name,
            variant_pattern,
            model_token,
        })
    }

    fn build_pattern(words: &[&str], leading_boundary: bool) -> Result<Regex> {
        let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
        let lead = if leading_boundary { r"(?:^|[^\p{L}\p{N}])" } else { "" };
        let pattern = format!(
            r"(?i){}(?P<name>{})(?P<suffix>[\p{{L}}\p{{N}}]*)",
            lead,
            escaped.join(r"\s+")
        );
        Regex::new(&pattern).map_err(|e| PriceCheckError::ProcessingError {
            message: format!("Invalid item pattern '{}': {}", pattern, e),
        })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn variant_pattern(&self) -> &Regex {
        &self.variant_pattern
    }

    pub fn model_token(&self) -> Option<&str> {
        self.model_token.as_ref().map(|(token, _)| token.as_str())
    }

    pub(crate) fn model_pattern(&self) -> Option<&Regex> {
        self.model_token.as_ref().map(|(_, pattern)| pattern)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceField {
    Title,
    Body,
}

/// 文中找到的一個價格候選
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidate {
    pub amount: Decimal,
    /// 在來源欄位中的字元位置
    pub position: usize,
    pub source_field: SourceField,
    /// 與同欄位中最近一次型號出現位置的字元距離
    pub distance: Option<usize>,
}

/// 包含上下限的價格區間
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Result<Self> {
        if min.is_sign_negative() {
            return Err(PriceCheckError::InvalidConfigValueError {
                field: "min_price".to_string(),
                value: min.to_string(),
                reason: "Price cannot be negative".to_string(),
            });
        }
        if min > max {
            return Err(PriceCheckError::InvalidConfigValueError {
                field: "max_price".to_string(),
                value: max.to_string(),
                reason: format!("Maximum price must not be below minimum price {}", min),
            });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub post: Post,
    pub price: Option<Decimal>,
    pub within_range: bool,
    pub within_date_window: bool,
}

impl Listing {
    pub fn new(post: Post, price: Option<Decimal>, range: &PriceRange, since: DateTime<Utc>) -> Self {
        let within_range = price.is_some_and(|p| range.contains(p));
        let within_date_window = post.created_at >= since;
        Self {
            post,
            price,
            within_range,
            within_date_window,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.price.is_some() && self.within_range && self.within_date_window
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub count: usize,
    pub average: Decimal,
    pub median: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

/// 一次搜尋的結果；沒有任何 listing 時 `stats` 為 `None`
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SearchReport {
    pub listings: Vec<Listing>,
    pub stats: Option<PriceStats>,
}

impl SearchReport {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn average(&self) -> Option<Decimal> {
        self.stats.as_ref().map(|s| s.average)
    }

    pub fn median(&self) -> Option<Decimal> {
        self.stats.as_ref().map(|s| s.median)
    }

    pub fn min(&self) -> Option<Decimal> {
        self.stats.as_ref().map(|s| s.min)
    }

    pub fn max(&self) -> Option<Decimal> {
        self.stats.as_ref().map(|s| s.max)
    }
}

pub const DEFAULT_RESULT_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub subreddits: Vec<String>,
    pub price_range: PriceRange,
    pub days_back: u32,
    pub limit: usize,
}

impl SearchRequest {
    pub fn new<I, S>(query: &str, subreddits: I, price_range: PriceRange, days_back: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for subreddit in subreddits {
            let subreddit = subreddit.into();
            if !unique.iter().any(|s| s.eq_ignore_ascii_case(&subreddit)) {
                unique.push(subreddit);
            }
        }

        Self {
            query: query.split_whitespace().collect::<Vec<_>>().join(" "),
            subreddits: unique,
            price_range,
            days_back,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
