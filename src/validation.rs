//! Field-level checks applied to bound request payloads before any storage access.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A point in time as sent by clients: epoch milliseconds or an RFC 3339 string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TimestampInput {
    Millis(i64),
    Text(String),
}

pub fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::new(field, "is required"))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

pub fn required_bool(field: &'static str, value: Option<bool>) -> Result<bool, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, "is required"))
}

/// Returns the timestamp as epoch milliseconds.
pub fn required_timestamp(
    field: &'static str,
    value: Option<TimestampInput>,
) -> Result<i64, ValidationError> {
    match value.ok_or_else(|| ValidationError::new(field, "is required"))? {
        TimestampInput::Millis(ms) => {
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
                .map_err(|_| ValidationError::new(field, "is out of range"))?;
            Ok(ms)
        }
        TimestampInput::Text(s) => {
            let dt = OffsetDateTime::parse(s.trim(), &Rfc3339)
                .map_err(|_| ValidationError::new(field, "must be epoch milliseconds or RFC 3339"))?;
            i64::try_from(dt.unix_timestamp_nanos().div_euclid(1_000_000))
                .map_err(|_| ValidationError::new(field, "is out of range"))
        }
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles");
    }
    EMAIL_RE.is_match(email)
}

/// Normalizes (trim + lowercase) and checks the address shape.
pub fn required_email(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let email = required_text(field, value)?.to_lowercase();
    if !is_valid_email(&email) {
        return Err(ValidationError::new(field, "must be a valid email address"));
    }
    Ok(email)
}
