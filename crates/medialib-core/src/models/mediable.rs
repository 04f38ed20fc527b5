use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the polymorphic media association table: links a media asset
/// to an owner entity identified by a type tag and id, plus the
/// placement-specific metadata payload for this particular use of the asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Mediable {
    pub id: i64,
    pub media_id: i64,
    /// Owner type tag, translated to a loader through the morph map.
    pub mediable_type: String,
    pub mediable_id: i64,
    /// Placement role within the owner, e.g. "cover" or "listing".
    pub role: Option<String>,
    /// Raw JSON text of the placement metadata payload
    /// (`field -> locale -> value`). Parsed leniently at resolution time.
    pub metadatas: String,
    pub created_at: DateTime<Utc>,
}

impl Mediable {
    pub fn metadata_payload(&self) -> &str {
        &self.metadatas
    }
}
