use crate::utils::error::{NumerologiaError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use url::Url;

/// Earliest birth year the forms accept.
pub const MIN_BIRTH_YEAR: i32 = 1900;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NumerologiaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| NumerologiaError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NumerologiaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Form-level checks for a person's name. The analyzers repeat the
/// "has a letter" check on their own.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(NumerologiaError::invalid_input("name cannot be empty"));
    }
    if !name.chars().any(char::is_alphabetic) {
        return Err(NumerologiaError::invalid_input(format!(
            "name '{}' has no letters",
            name
        )));
    }
    Ok(())
}

/// Birth dates must fall between 1900-01-01 and `today`.
pub fn validate_birth_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date.year() < MIN_BIRTH_YEAR {
        return Err(NumerologiaError::invalid_input(format!(
            "birth date {} is before {}",
            date, MIN_BIRTH_YEAR
        )));
    }
    if date > today {
        return Err(NumerologiaError::invalid_input(format!(
            "birth date {} is in the future",
            date
        )));
    }
    Ok(())
}

pub fn parse_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        NumerologiaError::invalid_input(format!(
            "{} '{}' is not a YYYY-MM-DD date: {}",
            field_name, value, e
        ))
    })
}
