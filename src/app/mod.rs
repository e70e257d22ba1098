pub mod prompt;
pub mod render;

use crate::config::toml_config::ProfileConfig;
use crate::config::CliConfig;
use crate::domain::model::{PriceRange, SearchRequest, DEFAULT_RESULT_LIMIT};
use crate::utils::error::Result;
use prompt::{default_subreddits, Prompter, DEFAULT_DAYS_BACK};
use std::io::{BufRead, Write};

/// 合併命令列、設定檔與互動輸入，組出搜尋請求
///
/// 命令列沒有給齊品名與價格時進入互動模式，缺少的天數與子版也一併詢問；
/// 否則天數與子版依序取命令列、設定檔、預設值。
pub fn resolve_request<R: BufRead, W: Write>(
    cli: &CliConfig,
    profile: &ProfileConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<SearchRequest> {
    let interactive = !cli.is_complete();

    let item = match &cli.item {
        Some(item) => item.clone(),
        None => prompter.item_name()?,
    };

    let (min, max) = match (cli.min_price, cli.max_price) {
        (Some(min), Some(max)) => (min, max),
        _ => prompter.price_range()?,
    };
    let price_range = PriceRange::new(min, max)?;

    let days_back = match cli.days {
        Some(days) => days,
        None if interactive => prompter.days_back()?,
        None => profile.days_back().unwrap_or(DEFAULT_DAYS_BACK),
    };

    let subreddits = if !cli.subreddits.is_empty() {
        cli.subreddits.clone()
    } else if interactive {
        prompter.subreddits()?
    } else {
        profile
            .default_subreddits()
            .map(|s| s.to_vec())
            .unwrap_or_else(default_subreddits)
    };

    let limit = cli
        .limit
        .or(profile.result_limit())
        .unwrap_or(DEFAULT_RESULT_LIMIT);

    Ok(SearchRequest::new(&item, subreddits, price_range, days_back).with_limit(limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_complete_command_line_never_prompts() {
        let cli = CliConfig::try_parse_from([
            "reddit-price-checker",
            "--item",
            "HD800",
            "--min-price",
            "500",
            "--max-price",
            "1500",
        ])
        .unwrap();
        let profile = ProfileConfig::from_toml_str(
            "[search]\ndefault_subreddits = [\"headphoneadvice\"]\ndays_back = 14\n[reddit]\nresult_limit = 25\n",
        )
        .unwrap();

        // 空輸入：若有提問會因 EOF 失敗
        let request = resolve_request(&cli, &profile, &mut prompter("")).unwrap();
        assert_eq!(request.query, "HD800");
        assert_eq!(request.days_back, 14);
        assert_eq!(request.subreddits, vec!["headphoneadvice"]);
        assert_eq!(request.limit, 25);
        assert_eq!(request.price_range.min, Decimal::from(500));
    }

    #[test]
    fn test_missing_values_are_prompted() {
        let cli = CliConfig::try_parse_from(["reddit-price-checker", "--days", "7"]).unwrap();
        let mut p = prompter("Sony A7III\n800\n1400\n2,3\n");

        let request = resolve_request(&cli, &ProfileConfig::default(), &mut p).unwrap();
        assert_eq!(request.query, "Sony A7III");
        assert_eq!(request.price_range.max, Decimal::from(1400));
        assert_eq!(request.days_back, 7);
        assert_eq!(request.subreddits, vec!["photomarket", "hardwareswap"]);
        assert_eq!(request.limit, DEFAULT_RESULT_LIMIT);
    }
}
