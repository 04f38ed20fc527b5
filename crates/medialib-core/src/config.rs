//! Configuration module
//!
//! Media library configuration is read once at process startup and treated as
//! immutable afterwards: the set of extra metadata fields, which fields are
//! per-locale translatable, the fallback-locale policy, table names, and the
//! URL bases used when building admin routes and image URLs.

use std::collections::HashMap;
use std::env;

use serde::Deserialize;

use crate::error::AppError;
use crate::validation::{validate_field_name, validate_locale_code, validate_table_name};

const DEFAULT_MEDIAS_TABLE: &str = "medias";
const DEFAULT_MEDIABLES_TABLE: &str = "mediables";
const DEFAULT_ADMIN_BASE_URL: &str = "/admin";
const DEFAULT_IMAGE_BASE_URL: &str = "/img";

/// One configured extra metadata field. Only the name is required; the admin
/// UI may carry extra presentation attributes we do not care about here.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExtraField {
    pub name: String,
}

/// Media library configuration.
#[derive(Clone, Debug)]
pub struct MediaLibraryConfig {
    /// Extra metadata fields, in configuration order.
    pub extra_fields: Vec<ExtraField>,
    /// Names of fields stored per-locale.
    pub translatable_fields: Vec<String>,
    /// Secondary locale consulted when the current locale has no value.
    pub fallback_locale: Option<String>,
    /// Whether the fallback locale is consulted at all.
    pub use_property_fallback: bool,
    pub medias_table: String,
    pub mediables_table: String,
    /// Module name -> admin browser route prefix, used for owner edit links.
    pub browser_route_prefixes: HashMap<String, String>,
    pub admin_base_url: String,
    pub image_base_url: String,
}

impl Default for MediaLibraryConfig {
    fn default() -> Self {
        MediaLibraryConfig {
            extra_fields: Vec::new(),
            translatable_fields: Vec::new(),
            fallback_locale: None,
            use_property_fallback: false,
            medias_table: DEFAULT_MEDIAS_TABLE.to_string(),
            mediables_table: DEFAULT_MEDIABLES_TABLE.to_string(),
            browser_route_prefixes: HashMap::new(),
            admin_base_url: DEFAULT_ADMIN_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl MediaLibraryConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let extra_fields = match env::var("MEDIA_EXTRA_FIELDS") {
            Ok(raw) => parse_extra_fields(&raw)?,
            Err(_) => Vec::new(),
        };

        let translatable_fields = env::var("MEDIA_TRANSLATABLE_FIELDS")
            .map(|raw| parse_name_list(&raw))
            .unwrap_or_default();

        let browser_route_prefixes = match env::var("BROWSER_ROUTE_PREFIXES") {
            Ok(raw) => parse_route_prefixes(&raw)?,
            Err(_) => HashMap::new(),
        };

        let config = MediaLibraryConfig {
            extra_fields,
            translatable_fields,
            fallback_locale: env::var("FALLBACK_LOCALE").ok().filter(|s| !s.is_empty()),
            use_property_fallback: env::var("USE_PROPERTY_FALLBACK")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            medias_table: env::var("MEDIAS_TABLE")
                .unwrap_or_else(|_| DEFAULT_MEDIAS_TABLE.to_string()),
            mediables_table: env::var("MEDIABLES_TABLE")
                .unwrap_or_else(|_| DEFAULT_MEDIABLES_TABLE.to_string()),
            browser_route_prefixes,
            admin_base_url: env::var("ADMIN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_BASE_URL.to_string()),
            image_base_url: env::var("IMAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on invalid configuration: bad field names or locale codes,
    /// and table names that are not plain SQL identifiers (they are
    /// interpolated into statements, never bound).
    pub fn validate(&self) -> Result<(), AppError> {
        for field in &self.extra_fields {
            validate_field_name(&field.name).map_err(config_error)?;
        }
        for field in &self.translatable_fields {
            validate_field_name(field).map_err(config_error)?;
        }
        if let Some(locale) = &self.fallback_locale {
            validate_locale_code(locale).map_err(config_error)?;
        }
        validate_table_name(&self.medias_table).map_err(config_error)?;
        validate_table_name(&self.mediables_table).map_err(config_error)?;
        Ok(())
    }
}

fn config_error(err: anyhow::Error) -> AppError {
    AppError::Config(err.to_string())
}

/// Parse the `MEDIA_EXTRA_FIELDS` value: a JSON array of objects carrying at
/// least a `name`, e.g. `[{"name": "credit"}, {"name": "source"}]`.
pub fn parse_extra_fields(raw: &str) -> Result<Vec<ExtraField>, AppError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        AppError::Config(format!(
            "MEDIA_EXTRA_FIELDS must be a JSON array of objects: {}",
            e
        ))
    })
}

/// Parse a comma-separated list of field names, dropping empty entries.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse the `BROWSER_ROUTE_PREFIXES` value: a JSON object mapping module
/// names to route prefixes, e.g. `{"articles": "content"}`.
pub fn parse_route_prefixes(raw: &str) -> Result<HashMap<String, String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| AppError::Config(format!("BROWSER_ROUTE_PREFIXES must be a JSON object: {}", e)))
}
