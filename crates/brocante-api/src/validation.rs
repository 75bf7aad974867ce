//! Input validation utilities for the Brocante API
//!
//! This module provides validation functions for API requests.

use validator::ValidationError;

/// Maximum length for listing titles
pub const MAX_TITLE_LENGTH: usize = 120;

/// Maximum length for listing descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 8 * 1024;

/// Maximum length for city names
pub const MAX_CITY_LENGTH: usize = 100;

/// Maximum length for attribute definition names
pub const MAX_ATTRIBUTE_NAME_LENGTH: usize = 80;

/// Maximum number of options on a select attribute
pub const MAX_SELECT_OPTIONS: usize = 50;

/// Maximum length for username field
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum length for password field
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a listing title
///
/// Titles must not be blank and must not exceed MAX_TITLE_LENGTH characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title_empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::new("title_too_long"));
    }
    Ok(())
}

/// Validate a listing price
///
/// Prices must be finite and non-negative.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::new("price_invalid"));
    }
    Ok(())
}

/// Validate a city name
pub fn validate_city(city: &str) -> Result<(), ValidationError> {
    if city.chars().count() > MAX_CITY_LENGTH {
        return Err(ValidationError::new("city_too_long"));
    }
    Ok(())
}

/// Validate an attribute definition name
///
/// Names must:
/// - Not be blank
/// - Not exceed MAX_ATTRIBUTE_NAME_LENGTH characters
/// - Contain no markup or path characters
pub fn validate_attribute_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("attribute_name_empty"));
    }
    if name.chars().count() > MAX_ATTRIBUTE_NAME_LENGTH {
        return Err(ValidationError::new("attribute_name_too_long"));
    }
    if !brocante_common::is_valid_name(name) {
        return Err(ValidationError::new("attribute_name_invalid_chars"));
    }
    Ok(())
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::new("username_empty"));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::new("username_too_long"));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(ValidationError::new("username_invalid_chars"));
    }
    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Appartement T3 lumineux").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(129_000.0).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_attribute_name() {
        assert!(validate_attribute_name("Surface").is_ok());
        assert!(validate_attribute_name("Type de contrat").is_ok());
        assert!(validate_attribute_name("").is_err());
        assert!(validate_attribute_name("a<b>").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("marie.dupont").is_ok());
        assert!(validate_username("user name").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }
}
