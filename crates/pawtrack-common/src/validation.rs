//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use validator::Validate;

use crate::error::PawtrackError;

/// Phone numbers in the format `+999999999`, 9 to 15 digits.
pub static PHONE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\+?1?\d{9,15}$").unwrap());

/// Validate a request body, surfacing per-field messages through the
/// envelope's `errors` map.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), PawtrackError> {
    body.validate().map_err(|e| PawtrackError::FieldErrors {
        errors: collect_field_errors(e),
    })
}

/// Group validation messages by field name.
fn collect_field_errors(errors: validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{field}'"))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Normalize an email address: trimmed, domain lowercased.
///
/// Matches the usual "normalize before uniqueness check" behavior so
/// `User@Example.COM` and `User@example.com` collide.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Normalize a microchip number: trimmed and uppercased.
pub fn normalize_microchip(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+14155552671"));
        assert!(PHONE_REGEX.is_match("123456789"));
        assert!(!PHONE_REGEX.is_match("12345"));
        assert!(!PHONE_REGEX.is_match("not-a-phone"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Pat@Example.COM "), "Pat@example.com");
        assert_eq!(normalize_email("pat@example.com"), "pat@example.com");
    }

    #[test]
    fn test_normalize_microchip() {
        assert_eq!(normalize_microchip("  abc123 "), "ABC123");
    }

    #[derive(validator::Validate)]
    struct NameForm {
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
    }

    #[test]
    fn test_validate_request_surfaces_field_errors() {
        let err = validate_request(&NameForm { name: "ab".into() }).unwrap_err();
        match err {
            PawtrackError::FieldErrors { errors } => {
                let messages = errors.get("name").expect("errors keyed by field");
                assert!(messages[0].contains("at least 3 characters"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
