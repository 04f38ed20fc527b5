use async_trait::async_trait;
use medialib_core::{AppError, MediaLibraryConfig, Mediable};
use sqlx::PgPool;

use crate::traits::OwnershipIndex;

/// Postgres-backed [`OwnershipIndex`] over the configured association table.
#[derive(Clone)]
pub struct MediableRepository {
    pool: PgPool,
    table: String,
}

impl MediableRepository {
    pub fn new(pool: PgPool, config: &MediaLibraryConfig) -> Self {
        Self {
            pool,
            table: config.mediables_table.clone(),
        }
    }
}

#[async_trait]
impl OwnershipIndex for MediableRepository {
    /// Single indexed lookup; owner counts are assumed bounded, so no
    /// pagination.
    async fn find_owners(&self, media_id: i64) -> Result<Vec<Mediable>, AppError> {
        let records = sqlx::query_as::<_, Mediable>(&format!(
            r#"
            SELECT id, media_id, mediable_type, mediable_id, role, metadatas, created_at
            FROM {}
            WHERE media_id = $1
            ORDER BY id
            "#,
            self.table
        ))
        .bind(media_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch owners for media {}: {}", media_id, e);
            AppError::Database(e)
        })?;

        Ok(records)
    }

    /// Index scan only, never materializes rows.
    async fn owner_count(&self, media_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {} WHERE media_id = $1",
            self.table
        ))
        .bind(media_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count owners for media {}: {}", media_id, e);
            AppError::Database(e)
        })?;

        Ok(count)
    }
}
