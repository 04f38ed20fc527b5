//! Media library facade
//!
//! Wires the repositories, owner projector, image service and route builder
//! together and assembles the CMS projection of an asset. Storage sits behind
//! the [`MediaStore`] and [`OwnershipIndex`] traits and payload assembly is a
//! pure function, so the facade stays testable without a database.

use std::sync::Arc;

use medialib_core::{
    AppError, FieldRegistry, Media, MediaCmsPayload, MediaLibraryConfig, MediaMetadataBlock,
    Mediable, MetadataResolver, OwnerDescriptor,
};
use medialib_db::{MediaRepository, MediaStore, MediableRepository, OwnershipIndex};
use serde_json::{json, Map, Value};
use sqlx::PgPool;

use crate::image_service::{CdnImageService, ImageRenderOpts, ImageService};
use crate::owners::{EntityLoaderRegistry, OwnerProjector};
use crate::routes::{AdminRouteBuilder, RouteBuilder};

/// Height hint for the CMS grid thumbnail.
const CMS_THUMBNAIL_HEIGHT: u32 = 256;
/// Height hint for the CMS preview rendition.
const CMS_MEDIUM_HEIGHT: u32 = 430;

pub struct MediaLibrary {
    medias: Arc<dyn MediaStore>,
    mediables: Arc<dyn OwnershipIndex>,
    projector: OwnerProjector,
    images: Arc<dyn ImageService>,
    routes: Arc<dyn RouteBuilder>,
    registry: Arc<FieldRegistry>,
    resolver: MetadataResolver,
}

impl MediaLibrary {
    pub fn new(
        medias: Arc<dyn MediaStore>,
        mediables: Arc<dyn OwnershipIndex>,
        projector: OwnerProjector,
        images: Arc<dyn ImageService>,
        routes: Arc<dyn RouteBuilder>,
        registry: Arc<FieldRegistry>,
        resolver: MetadataResolver,
    ) -> Self {
        Self {
            medias,
            mediables,
            projector,
            images,
            routes,
            registry,
            resolver,
        }
    }

    /// Build the whole stack from a pool, the startup configuration and the
    /// morph map of entity loaders.
    pub fn from_config(
        pool: PgPool,
        config: &MediaLibraryConfig,
        loaders: Arc<EntityLoaderRegistry>,
    ) -> Self {
        let registry = Arc::new(FieldRegistry::from_config(config));
        let routes: Arc<dyn RouteBuilder> =
            Arc::new(AdminRouteBuilder::new(config.admin_base_url.clone()));
        Self {
            medias: Arc::new(MediaRepository::new(pool.clone(), config)),
            mediables: Arc::new(MediableRepository::new(pool, config)),
            projector: OwnerProjector::new(loaders, routes.clone(), config),
            images: Arc::new(CdnImageService::new(config.image_base_url.clone())),
            routes,
            registry: registry.clone(),
            resolver: MetadataResolver::new(registry, config),
        }
    }

    /// Deletion guard: true iff the asset has no owners at call time.
    pub async fn can_delete_safely(&self, media_id: i64) -> Result<bool, AppError> {
        self.mediables.can_delete_safely(media_id).await
    }

    /// Delete the asset iff it has no owners; returns whether it was
    /// deleted. Advisory under concurrency, like the guard itself.
    pub async fn delete_if_unused(&self, media_id: i64) -> Result<bool, AppError> {
        if !self.mediables.can_delete_safely(media_id).await? {
            tracing::debug!("media {} still has owners, not deleting", media_id);
            return Ok(false);
        }
        self.medias.delete(media_id).await?;
        Ok(true)
    }

    /// Resolve the display value of a placement metadata field for one
    /// ownership record, with the asset's own fields as fallback.
    pub fn resolve_placement_metadata(
        &self,
        record: &Mediable,
        asset: &Media,
        field: &str,
        locale: &str,
        redirect: Option<&str>,
    ) -> String {
        self.resolver
            .resolve(record.metadata_payload(), field, locale, asset, redirect)
    }

    /// Assemble the CMS projection of an asset: URLs, tags, metadata split
    /// and the resolved owners list.
    pub async fn to_cms_payload(&self, media_id: i64) -> Result<MediaCmsPayload, AppError> {
        let media = self
            .medias
            .get_by_id(media_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media {} not found", media_id)))?;
        let tags = self.medias.tag_names(media_id).await?;
        let records = self.mediables.find_owners(media_id).await?;
        let owners = self.projector.project(&records).await?;
        let deletable = self.mediables.can_delete_safely(media_id).await?;

        Ok(build_cms_payload(
            &media,
            tags,
            owners,
            deletable,
            self.images.as_ref(),
            self.routes.as_ref(),
            &self.registry,
        ))
    }
}

/// Pure CMS payload assembly.
pub fn build_cms_payload(
    media: &Media,
    tags: Vec<String>,
    owners: Vec<OwnerDescriptor>,
    deletable: bool,
    images: &dyn ImageService,
    routes: &dyn RouteBuilder,
    registry: &FieldRegistry,
) -> MediaCmsPayload {
    let mut default = Map::new();
    default.insert(
        "caption".to_string(),
        media.caption.clone().map_or(Value::Null, Value::String),
    );
    default.insert(
        "altText".to_string(),
        media.alt_text.clone().map_or(Value::Null, Value::String),
    );
    default.insert("video".to_string(), Value::Null);
    for field in registry.extra_field_names() {
        default.insert(
            field.clone(),
            media.extra.get(field).cloned().unwrap_or(Value::Null),
        );
    }

    MediaCmsPayload {
        id: media.id,
        name: media.filename.clone(),
        thumbnail: images.get_cms_url(media.uuid, &ImageRenderOpts::height(CMS_THUMBNAIL_HEIGHT)),
        original: images.get_raw_url(media.uuid),
        medium: images.get_url(media.uuid, &ImageRenderOpts::height(CMS_MEDIUM_HEIGHT)),
        width: media.width,
        height: media.height,
        tags,
        delete_url: deletable
            .then(|| routes.module_route("medias", Some("media-library"), "destroy", media.id)),
        update_url: routes.route("media-library.medias.single-update"),
        update_bulk_url: routes.route("media-library.medias.bulk-update"),
        delete_bulk_url: routes.route("media-library.medias.bulk-delete"),
        metadatas: MediaMetadataBlock {
            default: Value::Object(default),
            // Placement-specific overrides are resolved per ownership record;
            // the asset-level projection carries null placeholders.
            custom: json!({"caption": null, "altText": null, "video": null}),
        },
        owners,
    }
}
