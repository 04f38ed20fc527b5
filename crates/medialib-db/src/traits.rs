//! Repository trait abstractions
//!
//! These traits define the minimal interface the service layer needs from the
//! repositories, allowing the facade and the deletion guard to be tested with
//! in-memory fakes instead of a live database.

use async_trait::async_trait;
use medialib_core::{AppError, Media, Mediable};

/// Media asset reads and the guarded delete, as consumed by the facade.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn get_by_id(&self, media_id: i64) -> Result<Option<Media>, AppError>;

    /// Tag names attached to an asset, for the CMS projection.
    async fn tag_names(&self, media_id: i64) -> Result<Vec<String>, AppError>;

    /// Delete an asset row. Callers are expected to consult the deletion
    /// guard first; this method does not re-check ownership.
    async fn delete(&self, media_id: i64) -> Result<(), AppError>;
}

/// Reader over the polymorphic media association table: which owner entities
/// reference a given asset, and the deletion guard predicate built on the
/// same index.
#[async_trait]
pub trait OwnershipIndex: Send + Sync {
    /// All ownership records referencing `media_id`, in storage order.
    async fn find_owners(&self, media_id: i64) -> Result<Vec<Mediable>, AppError>;

    /// Number of ownership records referencing `media_id`.
    async fn owner_count(&self, media_id: i64) -> Result<i64, AppError>;

    /// True iff the asset has no owners at call time. Advisory only: a
    /// concurrent write can add an owner right after this returns, so
    /// callers needing a firm answer must wrap deletion in a transaction.
    async fn can_delete_safely(&self, media_id: i64) -> Result<bool, AppError> {
        Ok(self.owner_count(media_id).await? == 0)
    }
}
