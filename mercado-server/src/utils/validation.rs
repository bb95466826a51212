//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so handlers cap
//! inputs here before anything reaches the repository layer.

use shared::AppError;
use shared::models::PaymentMethod;
use std::str::FromStr;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, username
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and other free text
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers and similar
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a payment method is one of the accepted labels.
pub fn validate_payment_method(value: &str) -> Result<(), AppError> {
    PaymentMethod::from_str(value)
        .map(|_| ())
        .map_err(|_| AppError::validation(format!("Invalid payment method: {value}")))
}
