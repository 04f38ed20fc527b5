//! Medialib Core Library
//!
//! Domain models, configuration, error types and the metadata resolution
//! rules shared across the media library components: the field registry
//! (which extra metadata fields exist, which are translatable), the
//! locale-aware metadata resolver, and the owner entity capabilities used by
//! ownership resolution.

pub mod config;
pub mod error;
pub mod fields;
pub mod inflect;
pub mod metadata;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ExtraField, MediaLibraryConfig};
pub use error::AppError;
pub use fields::FieldRegistry;
pub use metadata::{display_value, MetadataResolver, MetadataSource, DEFAULT_LOCALE_KEY};
pub use models::{
    Media, MediaCmsPayload, MediaMetadataBlock, Mediable, OwnerDescriptor, OwnerEntity,
    ResolvedOwner,
};

#[cfg(feature = "sqlx")]
pub use models::MediaRow;
