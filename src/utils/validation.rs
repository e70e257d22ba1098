use crate::utils::error::{PriceCheckError, Result};
use rust_decimal::Decimal;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PriceCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PriceCheckError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PriceCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PriceCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PriceCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 價格區間：下限必須為正，上限必須大於下限
pub fn validate_price_bounds(min: Decimal, max: Decimal) -> Result<()> {
    if min <= Decimal::ZERO {
        return Err(PriceCheckError::InvalidConfigValueError {
            field: "min_price".to_string(),
            value: min.to_string(),
            reason: "Minimum price must be greater than 0".to_string(),
        });
    }
    if max <= min {
        return Err(PriceCheckError::InvalidConfigValueError {
            field: "max_price".to_string(),
            value: max.to_string(),
            reason: format!("Maximum price must be greater than minimum price {}", min),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("reddit.api_base", "https://oauth.reddit.com").is_ok());
        assert!(validate_url("reddit.api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("reddit.api_base", "").is_err());
        assert!(validate_url("reddit.api_base", "invalid-url").is_err());
        assert!(validate_url("reddit.api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("limit", 100, 1).is_ok());
        assert!(validate_positive_number("limit", 0, 1).is_err());
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price_bounds(Decimal::from(500), Decimal::from(1500)).is_ok());
        assert!(validate_price_bounds(Decimal::ZERO, Decimal::from(1500)).is_err());
        assert!(validate_price_bounds(Decimal::from(1500), Decimal::from(1500)).is_err());
        assert!(validate_price_bounds(Decimal::from(1500), Decimal::from(500)).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("item", "HD800").is_ok());
        assert!(validate_non_empty_string("item", "   ").is_err());
    }
}
