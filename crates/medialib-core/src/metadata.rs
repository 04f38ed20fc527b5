//! Metadata resolution
//!
//! Resolves the display value of a metadata field for a given asset placement
//! and locale. Placement payloads are stored as raw JSON text of the shape
//! `field -> locale -> value`; plain (non-translatable) fields live under the
//! sentinel locale [`DEFAULT_LOCALE_KEY`]. Resolution never fails: malformed
//! payloads degrade to an empty mapping and every branch bottoms out in an
//! empty string.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::config::MediaLibraryConfig;
use crate::fields::FieldRegistry;

/// Sentinel locale key for values of non-translatable fields.
pub const DEFAULT_LOCALE_KEY: &str = "_default";

/// Attribute lookup on the asset itself, consulted when a placement payload
/// carries no value for a field. Translatable attributes return their whole
/// locale map; plain attributes return a scalar.
pub trait MetadataSource {
    fn metadata_attribute(&self, field: &str) -> Option<Value>;
}

#[derive(Clone, Debug)]
pub struct MetadataResolver {
    registry: Arc<FieldRegistry>,
    fallback_locale: Option<String>,
    use_property_fallback: bool,
}

impl MetadataResolver {
    pub fn new(registry: Arc<FieldRegistry>, config: &MediaLibraryConfig) -> Self {
        MetadataResolver {
            registry,
            fallback_locale: config.fallback_locale.clone(),
            use_property_fallback: config.use_property_fallback,
        }
    }

    /// Resolve the display value of `field` for the given placement payload
    /// and locale.
    ///
    /// Lookup order: payload value at the current locale, then at the
    /// fallback locale (translatable fields, policy permitting), then at the
    /// `_default` sentinel (plain fields), then the asset's own attribute
    /// (optionally redirected to a different attribute via `redirect`),
    /// reduced through the same locale rules. Always returns a string,
    /// possibly empty.
    pub fn resolve(
        &self,
        raw_payload: &str,
        field: &str,
        locale: &str,
        asset: &dyn MetadataSource,
        redirect: Option<&str>,
    ) -> String {
        let payload = parse_payload(raw_payload);

        if let Some(entry) = payload.get(field) {
            if let Some(value) = locale_value(entry, locale) {
                return value;
            }
            if self.registry.is_translatable(field) && self.use_property_fallback {
                if let Some(fallback) = &self.fallback_locale {
                    if let Some(value) = locale_value(entry, fallback) {
                        return value;
                    }
                }
            }
            if !self.registry.is_translatable(field) {
                if let Some(value) = locale_value(entry, DEFAULT_LOCALE_KEY) {
                    return value;
                }
            }
        }

        self.asset_fallback(field, locale, asset, redirect)
    }

    /// Read the fallback value off the asset itself. The target attribute
    /// defaults to the requested field but can be redirected, supporting
    /// "use this field's value as fallback for that field".
    fn asset_fallback(
        &self,
        field: &str,
        locale: &str,
        asset: &dyn MetadataSource,
        redirect: Option<&str>,
    ) -> String {
        let target = redirect.unwrap_or(field);
        let Some(raw) = asset.metadata_attribute(target) else {
            return String::new();
        };

        if self.registry.is_translatable(target) {
            if let Some(value) = locale_value(&raw, locale) {
                return value;
            }
            if self.use_property_fallback {
                if let Some(fallback) = &self.fallback_locale {
                    if let Some(value) = locale_value(&raw, fallback) {
                        return value;
                    }
                }
            }
            String::new()
        } else {
            display_value(&raw).unwrap_or_default()
        }
    }
}

/// Parse a raw payload as `field -> locale -> value`. Anything that is not a
/// JSON object (including unparseable text) is an empty mapping.
fn parse_payload(raw: &str) -> HashMap<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        _ => HashMap::new(),
    }
}

/// Look up a locale key inside a field entry. Entries that are not objects
/// are treated as unset; empty strings count as no value.
fn locale_value(entry: &Value, locale: &str) -> Option<String> {
    entry.as_object()?.get(locale).and_then(display_value)
}

/// Render a scalar JSON value for display. Empty strings, nulls and
/// non-scalar values yield `None`.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
