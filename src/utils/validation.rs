use crate::utils::error::{CostsError, Result};
use rust_decimal::Decimal;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CostsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CostsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CostsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CostsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 表單欄位：不可為空白
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CostsError::validation(
            field_name,
            format!("{} cannot be empty", field_name),
        ));
    }
    Ok(())
}

/// 金額不可為負數
pub fn validate_non_negative_amount(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(CostsError::validation(
            field_name,
            format!("{} cannot be negative (got {})", field_name, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("store.endpoint", "https://example.com").is_ok());
        assert!(validate_url("store.endpoint", "http://localhost:5000").is_ok());
        assert!(validate_url("store.endpoint", "").is_err());
        assert!(validate_url("store.endpoint", "invalid-url").is_err());
        assert!(validate_url("store.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("store.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("store.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_amounts_and_names() {
        assert!(validate_non_negative_amount("cost", Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount("cost", Decimal::new(-1, 2)).is_err());
        assert!(validate_non_empty_string("name", "Website").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
