use crate::utils::error::{MenuError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MenuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MenuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Storage keys become file names, so separators are refused.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.contains(['/', '\\', '\0']) || key == "." || key == ".." {
        return Err(MenuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Key must not contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MenuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<T, I>(field_name: &str, values: I) -> Result<()>
where
    T: Eq + Hash + Display,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    for value in values {
        let rendered = value.to_string();
        if !seen.insert(value) {
            return Err(MenuError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: rendered,
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_negative_price(field_name: &str, price: Decimal) -> Result<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(MenuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: price.to_string(),
            reason: "Price cannot be negative".to_string(),
        });
    }
    Ok(())
}

/// Largest price a user may type.
pub const MAX_PRICE_INPUT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Parses what a user typed into a price box.
pub fn parse_price_input(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| MenuError::InvalidPriceInput {
        input: raw.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("price is empty"));
    }
    if trimmed.contains('_') {
        return Err(invalid("not a number"));
    }

    let price = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid("not a number"))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid("price cannot be negative"));
    }
    if price > MAX_PRICE_INPUT {
        return Err(invalid("price is too large"));
    }

    Ok(price.max(Decimal::ZERO))
}
