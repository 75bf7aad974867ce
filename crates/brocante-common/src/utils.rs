//! Utility functions for Brocante
//!
//! Common helper functions used across the codebase.

use std::sync::LazyLock;

/// Regex pattern for validating names (categories, attribute definitions)
static NAME_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[^@#$%^&*<>/\\]+$").expect("Invalid regex pattern"));

/// Validate a display name contains no illegal characters
///
/// Names are free-form (accents and spaces allowed) but must not carry
/// markup or path characters.
///
/// # Examples
///
/// ```
/// use brocante_common::is_valid_name;
///
/// assert!(is_valid_name("Boîte de vitesse"));
/// assert!(is_valid_name("Type de contrat"));
/// assert!(!is_valid_name("a<script>"));
/// assert!(!is_valid_name(""));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && NAME_PATTERN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name_accepts_plain_names() {
        assert!(is_valid_name("Surface"));
        assert!(is_valid_name("Année de construction"));
        assert!(is_valid_name("Boîte de vitesse"));
    }

    #[test]
    fn test_is_valid_name_rejects_markup() {
        assert!(!is_valid_name("a<script>"));
        assert!(!is_valid_name("path/name"));
        assert!(!is_valid_name("back\\slash"));
        assert!(!is_valid_name("ha#sh"));
    }

    #[test]
    fn test_is_valid_name_rejects_blank() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
    }
}
