use uuid::Uuid;
use validator::ValidateEmail;

use crate::error::ApiError;

/// Parse a path identifier, rejecting malformed shapes before any query runs.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidIdentifier(raw.to_string()))
}

/// Validate an email address shape. The address itself is stored lowercase.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if !email.validate_email() {
        return Err(ApiError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Password policy: at least 8 characters with at least one letter and one
/// digit.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters long".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic())
        || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(ApiError::Validation(
            "password must contain at least one letter and one digit".to_string(),
        ));
    }
    Ok(())
}

/// Display names: non-empty, at most 60 characters.
pub fn validate_name(name: &str) -> Result<(), ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > 60 {
        return Err(ApiError::Validation(
            "name cannot be more than 60 characters".to_string(),
        ));
    }
    Ok(())
}

/// Content titles: non-empty, at most 100 characters.
pub fn validate_title(title: &str) -> Result<(), ApiError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("title cannot be empty".to_string()));
    }
    if trimmed.chars().count() > 100 {
        return Err(ApiError::Validation(
            "title cannot be more than 100 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert!(parse_id("b2bfc8a6-7f0a-4c69-9e0a-9a6a0b3ea3f2").is_ok());
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("abcdef12").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("lettersonly").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(61)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Arrays and Strings").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"t".repeat(101)).is_err());
    }
}
