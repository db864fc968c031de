use crate::utils::error::{FilterError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Link targets and display texts are never empty and never contain square
/// brackets, so such an entry could never match. Whitespace is significant:
/// `[[ |x]]` has the target `" "`.
pub fn validate_filter_names(field_name: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();

    for name in names {
        if name.is_empty() {
            return Err(FilterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Name cannot be empty".to_string(),
            });
        }

        if name.contains(['[', ']']) {
            return Err(FilterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Square brackets can never appear in a link".to_string(),
            });
        }

        if !seen.insert(name.as_str()) {
            tracing::warn!("Duplicate entry '{}' in {}", name, field_name);
        }
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }

    Err(FilterError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Expected one of: {}", allowed.join(", ")),
    })
}
