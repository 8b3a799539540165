//! API utility functions
//!
//! Request validation shared by the handlers.

use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum customer name length in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum `top_k` accepted by the search endpoint
pub const MAX_SEARCH_RESULTS: usize = 20;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL is a compile-time constant")
});

/// Validate and trim a customer message
///
/// # Arguments
/// * `text` - Message text
/// * `max_length` - Limit in characters, applied after trimming
///
/// # Returns
/// * `Ok(&str)` - The trimmed message
/// * `Err(AppError::InvalidRequest)` - Empty or too long
pub fn validate_message_text(text: &str, max_length: usize) -> Result<&str, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidRequest(
            "Message text cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > max_length {
        return Err(AppError::InvalidRequest(format!(
            "Message text exceeds maximum length of {} characters",
            max_length
        )));
    }
    Ok(trimmed)
}

/// Validate an optional customer name, returning it trimmed
pub fn validate_customer_name(name: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(name) = name else {
        return Ok(None);
    };
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidRequest(
            "Customer name cannot be empty if provided".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::InvalidRequest(format!(
            "Customer name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Validate an optional customer email, returning it trimmed
pub fn validate_customer_email(email: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(email) = email else {
        return Ok(None);
    };
    let trimmed = email.trim();
    if !EMAIL.is_match(trimmed) {
        return Err(AppError::InvalidRequest(format!(
            "Invalid email address: {}",
            trimmed
        )));
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text_is_trimmed() {
        assert_eq!(validate_message_text("  hi  ", 10).unwrap(), "hi");
    }

    #[test]
    fn test_message_text_empty() {
        assert!(validate_message_text("   ", 10).is_err());
        assert!(validate_message_text("", 10).is_err());
    }

    #[test]
    fn test_message_text_length_counts_chars() {
        assert!(validate_message_text(&"é".repeat(10), 10).is_ok());
        assert!(validate_message_text(&"a".repeat(11), 10).is_err());
    }

    #[test]
    fn test_customer_name() {
        assert_eq!(validate_customer_name(None).unwrap(), None);
        assert_eq!(
            validate_customer_name(Some(" Ada ")).unwrap().as_deref(),
            Some("Ada")
        );
        assert!(validate_customer_name(Some("  ")).is_err());
        assert!(validate_customer_name(Some(&"x".repeat(101))).is_err());
    }

    #[test]
    fn test_customer_email() {
        assert_eq!(validate_customer_email(None).unwrap(), None);
        assert_eq!(
            validate_customer_email(Some("ada@example.com"))
                .unwrap()
                .as_deref(),
            Some("ada@example.com")
        );
        assert!(validate_customer_email(Some("not-an-email")).is_err());
        assert!(validate_customer_email(Some("a@b")).is_err());
        assert!(validate_customer_email(Some("a b@example.com")).is_err());
    }
}
