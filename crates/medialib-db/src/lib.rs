//! Medialib Database Layer
//!
//! This crate provides the sqlx/Postgres repositories backing the media
//! library: asset rows, the polymorphic ownership index, and the deletion
//! guard predicate. Table names come from startup configuration.

pub mod db;
pub mod traits;

pub use db::{MediaRepository, MediableRepository};
pub use traits::{MediaStore, OwnershipIndex};
