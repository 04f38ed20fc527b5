//! Metadata field name and locale code validation
//!
//! Extra metadata fields come from configuration, but that configuration is
//! still operator input: field names end up as payload keys and as columns of
//! the CMS projection, so they are validated once at startup.

use anyhow::{Context, Result};
use regex::Regex;

/// Maximum length for metadata field names (64 characters)
pub const MAX_FIELD_NAME_LENGTH: usize = 64;

/// Reserved prefixes that configured fields cannot use
const RESERVED_PREFIXES: &[&str] = &["_system_", "_internal_"];

/// Validate a configured metadata field name
///
/// Rules:
/// - Must match pattern: `^[a-zA-Z0-9_\\-\\.:]+$`
/// - Maximum 64 characters
/// - Cannot start with reserved prefixes
pub fn validate_field_name(name: &str) -> Result<()> {
    if name.len() > MAX_FIELD_NAME_LENGTH {
        return Err(anyhow::anyhow!(
            "Metadata field '{}' exceeds maximum length of {} characters",
            name,
            MAX_FIELD_NAME_LENGTH
        ));
    }

    if name.is_empty() {
        return Err(anyhow::anyhow!("Metadata field name cannot be empty"));
    }

    let pattern = Regex::new(r"^[a-zA-Z0-9_\-\.:]+$")
        .context("Failed to compile field name validation regex")?;

    if !pattern.is_match(name) {
        return Err(anyhow::anyhow!(
            "Metadata field '{}' contains invalid characters. Allowed: letters (a-z, A-Z), digits (0-9), underscore (_), hyphen (-), dot (.), colon (:)",
            name
        ));
    }

    if is_reserved_field_name(name) {
        return Err(anyhow::anyhow!(
            "Metadata field '{}' uses a reserved prefix. Reserved prefixes: {:?}",
            name,
            RESERVED_PREFIXES
        ));
    }

    Ok(())
}

/// Check if a field name is reserved (starts with reserved prefix)
pub fn is_reserved_field_name(name: &str) -> bool {
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Maximum length for table names (Postgres identifier limit)
pub const MAX_TABLE_NAME_LENGTH: usize = 63;

/// Validate a configured table name
///
/// Table names are interpolated into SQL statements (identifiers cannot be
/// bound parameters), so they must be plain identifiers:
/// - Must match pattern: `^[a-zA-Z_][a-zA-Z0-9_]*$`
/// - Maximum 63 characters
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow::anyhow!("Table name cannot be empty"));
    }

    if name.len() > MAX_TABLE_NAME_LENGTH {
        return Err(anyhow::anyhow!(
            "Table name '{}' exceeds maximum length of {} characters",
            name,
            MAX_TABLE_NAME_LENGTH
        ));
    }

    let pattern = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$")
        .context("Failed to compile table name validation regex")?;

    if !pattern.is_match(name) {
        return Err(anyhow::anyhow!(
            "Table name '{}' is not a plain SQL identifier. Allowed: letters (a-z, A-Z), digits (0-9), underscore (_); must not start with a digit",
            name
        ));
    }

    Ok(())
}

/// Validate a locale code: a short language tag, optionally with a region
/// subtag, e.g. `en`, `fr`, `pt-BR`, `zh_Hant`.
pub fn validate_locale_code(locale: &str) -> Result<()> {
    let pattern = Regex::new(r"^[a-zA-Z]{2,8}([_-][a-zA-Z0-9]{2,8})?$")
        .context("Failed to compile locale validation regex")?;

    if !pattern.is_match(locale) {
        return Err(anyhow::anyhow!("'{}' is not a valid locale code", locale));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_field_names() {
        for name in ["credit", "alt_text", "photo-credit", "meta.credit", "a:b"] {
            validate_field_name(name).unwrap();
        }
    }

    #[test]
    fn test_invalid_field_names() {
        assert!(validate_field_name("").is_err());
        assert!(validate_field_name("has space").is_err());
        assert!(validate_field_name("émoji").is_err());
        assert!(validate_field_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_reserved_prefixes() {
        assert!(is_reserved_field_name("_system_origin"));
        assert!(is_reserved_field_name("_internal_rank"));
        assert!(!is_reserved_field_name("system"));
        assert!(validate_field_name("_system_origin").is_err());
    }

    #[test]
    fn test_valid_table_names() {
        for name in ["medias", "mediables", "cms_media", "_staging"] {
            validate_table_name(name).unwrap();
        }
    }

    #[test]
    fn test_invalid_table_names() {
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("medias; drop table users").is_err());
        assert!(validate_table_name("media-files").is_err());
        assert!(validate_table_name("public.medias").is_err());
        assert!(validate_table_name("2medias").is_err());
        assert!(validate_table_name(&"x".repeat(64)).is_err());
    }

    #[test]
    fn test_locale_codes() {
        for locale in ["en", "fr", "pt-BR", "zh_Hant"] {
            validate_locale_code(locale).unwrap();
        }
        assert!(validate_locale_code("").is_err());
        assert!(validate_locale_code("e").is_err());
        assert!(validate_locale_code("not a locale").is_err());
    }
}
