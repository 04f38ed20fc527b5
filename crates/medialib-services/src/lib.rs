//! Medialib Services Layer
//!
//! Owner resolution machinery (entity loader registry and projector), the
//! admin route and image URL builders, and the `MediaLibrary` facade that
//! assembles the CMS projection of an asset. Keep orchestration here; the
//! repositories stay thin in medialib-db.

pub mod image_service;
pub mod library;
pub mod owners;
pub mod routes;
pub mod telemetry;

pub use image_service::{CdnImageService, ImageRenderOpts, ImageService};
pub use library::{build_cms_payload, MediaLibrary};
pub use owners::{EntityLoader, EntityLoaderRegistry, OwnerProjector};
pub use routes::{AdminRouteBuilder, RouteBuilder};
pub use telemetry::init_tracing;
