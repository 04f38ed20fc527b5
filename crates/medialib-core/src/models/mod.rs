//! Domain models

pub mod media;
pub mod mediable;
pub mod owner;

pub use media::{Media, MediaCmsPayload, MediaMetadataBlock};
pub use mediable::Mediable;
pub use owner::{OwnerDescriptor, OwnerEntity, ResolvedOwner};

#[cfg(feature = "sqlx")]
pub use media::MediaRow;
