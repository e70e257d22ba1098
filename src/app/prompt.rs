use crate::utils::error::{PriceCheckError, Result};
use crate::utils::validation::validate_price_bounds;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const SUBREDDIT_CHOICES: [(&str, &str, &str); 5] = [
    ("1", "avexchange", "Audio equipment"),
    ("2", "photomarket", "Photography equipment"),
    ("3", "hardwareswap", "Computer hardware"),
    ("4", "mechmarket", "Mechanical keyboards"),
    ("5", "Watchexchange", "Watches"),
];

pub const DEFAULT_SUBREDDITS: [&str; 2] = ["avexchange", "photomarket"];

pub const DEFAULT_DAYS_BACK: u32 = 30;

/// 互動式提問；輸入結束（EOF）視為錯誤
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PriceCheckError::ConfigError {
                message: "input closed before all questions were answered".to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn item_name(&mut self) -> Result<String> {
        loop {
            let item = self.ask("Enter item name to search (e.g., 'Sony A7III' or 'HD800'): ")?;
            if !item.is_empty() {
                return Ok(item);
            }
            self.say("Item name cannot be empty.")?;
        }
    }

    pub fn price_range(&mut self) -> Result<(Decimal, Decimal)> {
        loop {
            let min = self.ask("Enter minimum expected price (e.g., 500): $")?;
            let max = self.ask("Enter maximum expected price (e.g., 1500): $")?;

            match (parse_price(&min), parse_price(&max)) {
                (Some(min), Some(max)) => {
                    if validate_price_bounds(min, max).is_ok() {
                        return Ok((min, max));
                    }
                    self.say("Invalid range. Maximum price must be greater than minimum price.")?;
                }
                _ => self.say("Please enter valid numbers.")?,
            }
        }
    }

    pub fn days_back(&mut self) -> Result<u32> {
        loop {
            let days = self.ask(&format!(
                "Enter number of days to look back (default {}): ",
                DEFAULT_DAYS_BACK
            ))?;
            if days.is_empty() {
                return Ok(DEFAULT_DAYS_BACK);
            }
            match days.parse::<u32>() {
                Ok(days) => return Ok(days),
                Err(_) => self.say("Please enter a whole number of days.")?,
            }
        }
    }

    pub fn subreddits(&mut self) -> Result<Vec<String>> {
        self.say("\nAvailable subreddits:")?;
        for (number, name, description) in SUBREDDIT_CHOICES {
            self.say(&format!("{}. r/{} ({})", number, name, description))?;
        }
        self.say(&format!(
            "Enter numbers separated by commas, or press Enter for default ({})",
            DEFAULT_SUBREDDITS.join(", ")
        ))?;

        let choices = self.ask("Your choice(s): ")?;
        let selected = parse_subreddit_choices(&choices);
        if selected.is_empty() {
            if !choices.is_empty() {
                self.say("No valid choices, using the defaults.")?;
            }
            return Ok(default_subreddits());
        }
        Ok(selected)
    }
}

pub fn default_subreddits() -> Vec<String> {
    DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect()
}

/// "1, 3" -> ["avexchange", "hardwareswap"]；未知編號略過
pub fn parse_subreddit_choices(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter_map(|choice| {
            SUBREDDIT_CHOICES
                .iter()
                .find(|(number, _, _)| *number == choice)
                .map(|(_, name, _)| name.to_string())
        })
        .collect()
}

fn parse_price(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(cleaned.trim()).ok()
}
