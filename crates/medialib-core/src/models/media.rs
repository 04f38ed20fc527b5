use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::metadata::MetadataSource;
use crate::models::owner::OwnerDescriptor;

/// A media asset. File bytes live in an external image service addressed by
/// `uuid`; this row carries identity, dimensions, the base caption/alt text
/// and the configuration-driven extra metadata fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: i64,
    pub uuid: Uuid,
    pub filename: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub width: i32,
    pub height: i32,
    /// Extra metadata fields from configuration. Translatable fields hold a
    /// locale -> value object, plain fields hold a scalar. All optional.
    pub extra: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Media {
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Derive a default alt text from an uploaded filename: strip directory,
    /// extension and a trailing `@2x` retina suffix, replace everything
    /// non-alphanumeric with spaces, and uppercase each word.
    pub fn alt_text_from(filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);
        let stem = stem.strip_suffix("@2x").unwrap_or(stem);

        stem.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect::<String>()
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl MetadataSource for Media {
    fn metadata_attribute(&self, field: &str) -> Option<Value> {
        match field {
            "caption" => self.caption.clone().map(Value::String),
            "altText" | "alt_text" => self.alt_text.clone().map(Value::String),
            "filename" => Some(Value::String(self.filename.clone())),
            _ => self.extra.get(field).cloned(),
        }
    }
}

/// Database row for a media asset. `extra_metadata` is stored as raw JSON
/// text and parsed leniently on the way to the domain model.
#[cfg(feature = "sqlx")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaRow {
    pub id: i64,
    pub uuid: Uuid,
    pub filename: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub width: i32,
    pub height: i32,
    pub extra_metadata: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "sqlx")]
impl MediaRow {
    /// Parse the stored extra metadata. Anything that is not a JSON object
    /// degrades to an empty map.
    pub fn extra_parsed(&self) -> HashMap<String, Value> {
        self.extra_metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map.into_iter().collect()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn into_media(self) -> Media {
        let extra = self.extra_parsed();
        Media {
            id: self.id,
            uuid: self.uuid,
            filename: self.filename,
            alt_text: self.alt_text,
            caption: self.caption,
            width: self.width,
            height: self.height,
            extra,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// CMS projection of a media asset, consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct MediaCmsPayload {
    pub id: i64,
    pub name: String,
    pub thumbnail: String,
    pub original: String,
    pub medium: String,
    pub width: i32,
    pub height: i32,
    pub tags: Vec<String>,
    /// Present only while the asset has no owners.
    #[serde(rename = "deleteUrl")]
    pub delete_url: Option<String>,
    #[serde(rename = "updateUrl")]
    pub update_url: String,
    #[serde(rename = "updateBulkUrl")]
    pub update_bulk_url: String,
    #[serde(rename = "deleteBulkUrl")]
    pub delete_bulk_url: String,
    pub metadatas: MediaMetadataBlock,
    pub owners: Vec<OwnerDescriptor>,
}

/// Metadata split of the CMS projection: `default` carries the asset's own
/// fields, `custom` the placement-specific overrides (always-null
/// placeholders for now).
#[derive(Debug, Clone, Serialize)]
pub struct MediaMetadataBlock {
    pub default: Value,
    pub custom: Value,
}
