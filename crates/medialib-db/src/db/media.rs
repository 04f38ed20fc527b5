use std::collections::HashMap;

use async_trait::async_trait;
use medialib_core::models::MediaRow;
use medialib_core::{AppError, Media, MediaLibraryConfig};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::traits::MediaStore;

/// Repository for media asset rows.
///
/// The table name comes from startup configuration (never from request
/// input); ids and values are always bound parameters.
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
    table: String,
}

const MEDIA_COLUMNS: &str =
    "id, uuid, filename, alt_text, caption, width, height, extra_metadata, created_at, updated_at";

impl MediaRepository {
    pub fn new(pool: PgPool, config: &MediaLibraryConfig) -> Self {
        Self {
            pool,
            table: config.medias_table.clone(),
        }
    }

    /// Insert a freshly uploaded asset. Alt text defaults to a value derived
    /// from the filename.
    pub async fn create(
        &self,
        uuid: Uuid,
        filename: &str,
        width: i32,
        height: i32,
    ) -> Result<Media, AppError> {
        let alt_text = Media::alt_text_from(filename);
        let row = sqlx::query_as::<_, MediaRow>(&format!(
            r#"
            INSERT INTO {} (uuid, filename, alt_text, width, height, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {}
            "#,
            self.table, MEDIA_COLUMNS
        ))
        .bind(uuid)
        .bind(filename)
        .bind(&alt_text)
        .bind(width)
        .bind(height)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create media '{}': {}", filename, e);
            AppError::Database(e)
        })?;

        tracing::info!("Created media {} ({})", row.id, row.filename);
        Ok(row.into_media())
    }

    /// Update the asset's own metadata: base caption/alt text and the extra
    /// field map (persisted as JSON text).
    pub async fn update_metadata(
        &self,
        media_id: i64,
        caption: Option<&str>,
        alt_text: Option<&str>,
        extra: &HashMap<String, Value>,
    ) -> Result<Media, AppError> {
        let extra_json = serde_json::to_string(extra)?;
        let row = sqlx::query_as::<_, MediaRow>(&format!(
            r#"
            UPDATE {} SET caption = $2, alt_text = $3, extra_metadata = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            self.table, MEDIA_COLUMNS
        ))
        .bind(media_id)
        .bind(caption)
        .bind(alt_text)
        .bind(&extra_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update media {}: {}", media_id, e);
            if matches!(e, sqlx::Error::RowNotFound) {
                AppError::NotFound(format!("Media {} not found", media_id))
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(row.into_media())
    }
}

#[async_trait]
impl MediaStore for MediaRepository {
    async fn get_by_id(&self, media_id: i64) -> Result<Option<Media>, AppError> {
        let row = sqlx::query_as::<_, MediaRow>(&format!(
            "SELECT {} FROM {} WHERE id = $1",
            MEDIA_COLUMNS, self.table
        ))
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch media {}: {}", media_id, e);
            AppError::Database(e)
        })?;

        Ok(row.map(MediaRow::into_media))
    }

    async fn tag_names(&self, media_id: i64) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM media_tags WHERE media_id = $1 ORDER BY name",
        )
        .bind(media_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch tags for media {}: {}", media_id, e);
            AppError::Database(e)
        })?;

        Ok(names)
    }

    async fn delete(&self, media_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table))
            .bind(media_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete media {}: {}", media_id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Media {} not found", media_id)));
        }

        tracing::info!("Deleted media {}", media_id);
        Ok(())
    }
}
