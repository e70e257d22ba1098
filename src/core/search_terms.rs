use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const SALE_TAGS: &str = r#"(title:"[WTS]" OR title:"[S]")"#;

static SALE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*(?:wts(?:\s*/\s*wtt)?|fs|s)\s*\]").expect("sale marker pattern is valid")
});

static LETTERS_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<letters>[A-Za-z]+)(?P<digits>\d+)$").expect("model pattern is valid")
});

/// 標題是否帶有販售標籤（`[WTS]`、`[S]`、`[FS]`、`[WTS/WTT]`）
pub fn is_sale_post(title: &str) -> bool {
    SALE_MARKER.is_match(title)
}

/// 回看天數對應 Reddit 搜尋的 `t` 參數
pub fn time_filter(days: u32) -> &'static str {
    match days {
        0..=1 => "day",
        2..=7 => "week",
        8..=31 => "month",
        32..=365 => "year",
        _ => "all",
    }
}

pub fn build_query(term: &str) -> String {
    format!(r#"(title:"{term}" OR selftext:"{term}") AND {SALE_TAGS}"#)
}

/// 只以型號搜尋標題，用於其他查詢都沒有結果時
pub fn broad_query(model: &str) -> String {
    format!(r#"title:"{model}" AND {SALE_TAGS}"#)
}

/// 產生搜尋字詞的各種寫法，型號本身不做改動
pub fn search_variations(item_name: &str) -> BTreeSet<String> {
    let base_term = item_name.split_whitespace().collect::<Vec<_>>().join(" ");
    let parts: Vec<&str> = base_term.split(' ').collect();

    let mut variations = BTreeSet::new();
    variations.insert(base_term.clone());

    if let [brand_parts @ .., model] = parts.as_slice() {
        if brand_parts.is_empty() {
            return variations;
        }
        let brand = brand_parts.join(" ");

        variations.insert(format!("{}{}", brand, model));
        variations.insert(format!("{}-{}", brand, model));
        variations.insert(model.to_string());

        variations.insert(base_term.to_lowercase());
        variations.insert(base_term.to_uppercase());
        variations.insert(title_case(&base_term));

        // "HD800" -> "HD 800"
        if let Some(caps) = LETTERS_DIGITS.captures(model) {
            variations.insert(format!("{} {} {}", brand, &caps["letters"], &caps["digits"]));
            variations.insert(format!("{} {}{}", brand, &caps["letters"], &caps["digits"]));
        }
    }

    variations
}

fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    result
}
