use crate::core::matcher::char_offset;
use crate::domain::model::{ModelQuery, PriceCandidate, SourceField};
use crate::domain::ports::PriceExtractor;
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

/// 超過兩位小數的數字視為型號、年份等非價格數字。
///
/// Known limitation: legitimate prices written with three decimals
/// ("$1.500" in European notation) are rejected too.
pub const MAX_FRACTION_DIGITS: usize = 2;

// 幣別符號或價格關鍵字在前："$1,000"、"US$ 900"、"asking: 750"、"price is $1000"
static PREFIXED_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:us\$|\$|€|£|\b(?:asking(?:\s+price)?|price(?:\s+is)?|selling\s+for|for)\b\s*:?\s*\$?)\s*(?P<amount>\d{1,3}(?:,\d{3})+|\d+)(?P<fraction>\.\d+)?",
    )
    .expect("prefixed price pattern is valid")
});

// 幣別在後："900$"、"1,200 USD"
static SUFFIXED_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<amount>\d{1,3}(?:,\d{3})+|\d+)(?P<fraction>\.\d+)?\s*(?:\$|usd\b)")
        .expect("suffixed price pattern is valid")
});

// 金額後面接時間單位時是使用期間，不是價格："used for 2 years"、"for 3-4 weeks"
static DURATION_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\+|-\s*\d+)?\s*(?:years?|yrs?|months?|mos?|weeks?|wks?|days?|hours?|hrs?)\b")
        .expect("duration unit pattern is valid")
});

/// 以文字距離決定價格的擷取策略
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexPriceExtractor;

impl RegexPriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceExtractor for RegexPriceExtractor {
    fn name(&self) -> &'static str {
        "regex"
    }

    async fn extract(&self, title: &str, body: &str, item_name: &str) -> Result<Option<Decimal>> {
        Ok(resolve_price(title, body, item_name))
    }
}

/// 標題與內文中的所有價格候選，依優先順序排列（第一個即為選定價格）
///
/// 排序依據：與同欄位最近一次型號出現位置的距離（越近越前），
/// 距離相同時標題優先，再依文件順序。欄位內沒有型號時，候選排在所有有距離的候選之後。
pub fn extract(title: &str, body: &str, item_name: &str) -> Vec<PriceCandidate> {
    match ModelQuery::new(item_name) {
        Ok(query) => extract_candidates(title, body, &query),
        Err(_) => Vec::new(),
    }
}

pub fn extract_candidates(title: &str, body: &str, query: &ModelQuery) -> Vec<PriceCandidate> {
    let mut candidates = scan_field(title, SourceField::Title, &query.positions(title));
    candidates.extend(scan_field(body, SourceField::Body, &query.positions(body)));

    candidates.sort_by_key(|c| {
        (
            c.distance.is_none(),
            c.distance.unwrap_or(0),
            c.source_field,
            c.position,
        )
    });
    candidates
}

pub fn resolve_price(title: &str, body: &str, item_name: &str) -> Option<Decimal> {
    extract(title, body, item_name)
        .into_iter()
        .next()
        .map(|candidate| candidate.amount)
}

/// 單一欄位中的價格（金額、字元位置），依文件順序
pub fn find_prices(text: &str) -> Vec<(Decimal, usize)> {
    let mut found: Vec<(Decimal, usize)> = Vec::new();
    let mut claimed: Vec<Range<usize>> = Vec::new();

    for caps in PREFIXED_PRICE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        claimed.push(whole.range());
        let rest = &text[whole.end()..];
        if followed_by_alphanumeric(text, whole.end()) || DURATION_UNIT.is_match(rest) {
            continue;
        }
        if let Some(amount) = parse_amount(&caps) {
            found.push((amount, char_offset(text, whole.start())));
        }
    }

    for caps in SUFFIXED_PRICE.captures_iter(text) {
        let Some(amount_match) = caps.name("amount") else { continue };
        let span = amount_match.range();
        if claimed.iter().any(|r| r.start < span.end && span.start < r.end) {
            continue;
        }
        if let Some(amount) = parse_amount(&caps) {
            found.push((amount, char_offset(text, span.start)));
        }
    }

    found.sort_by_key(|(_, position)| *position);
    found
}

fn scan_field(text: &str, field: SourceField, item_positions: &[usize]) -> Vec<PriceCandidate> {
    find_prices(text)
        .into_iter()
        .map(|(amount, position)| PriceCandidate {
            amount,
            position,
            source_field: field,
            distance: item_positions.iter().map(|p| p.abs_diff(position)).min(),
        })
        .collect()
}

fn parse_amount(caps: &Captures) -> Option<Decimal> {
    let amount = caps.name("amount")?.as_str().replace(',', "");
    let fraction = caps.name("fraction").map(|m| m.as_str()).unwrap_or("");

    // fraction 包含小數點本身
    if fraction.len() > MAX_FRACTION_DIGITS + 1 {
        return None;
    }

    Decimal::from_str(&format!("{}{}", amount, fraction)).ok()
}

fn followed_by_alphanumeric(text: &str, byte_index: usize) -> bool {
    text[byte_index..]
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric())
}
