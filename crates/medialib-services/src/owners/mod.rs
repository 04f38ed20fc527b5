//! Owner resolution
//!
//! The morph map from the association table's type tags to concrete entity
//! loaders, and the projector that turns ownership records into uniform
//! owner descriptors.

pub mod projector;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use medialib_core::{AppError, ResolvedOwner};

pub use projector::OwnerProjector;

/// Loading capability for one owner entity type. `Ok(None)` means the row is
/// gone (a dangling association); hard failures (connection errors) propagate
/// unchanged.
#[async_trait]
pub trait EntityLoader: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ResolvedOwner>, AppError>;
}

/// The morph map: stored owner type tags to entity loaders. Populated once
/// at startup; resolution is a plain lookup with no reflection fallback, so
/// an unmapped tag simply has no loader.
#[derive(Clone, Default)]
pub struct EntityLoaderRegistry {
    loaders: HashMap<String, Arc<dyn EntityLoader>>,
}

impl EntityLoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, type_tag: impl Into<String>, loader: Arc<dyn EntityLoader>) {
        self.loaders.insert(type_tag.into(), loader);
    }

    pub fn resolve(&self, type_tag: &str) -> Option<&Arc<dyn EntityLoader>> {
        self.loaders.get(type_tag)
    }

    pub fn registered_tags(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }
}
