//! Owner projector
//!
//! Turns raw ownership records into uniform [`OwnerDescriptor`]s without
//! knowing the owners' concrete types: type tags resolve through the morph
//! map, blocks are normalized to their parent entity, and every resolution
//! failure drops the record instead of failing the whole pass: the owners
//! list must stay renderable over a partially inconsistent database.

use std::collections::HashMap;
use std::sync::Arc;

use medialib_core::{
    display_value, inflect, AppError, MediaLibraryConfig, Mediable, OwnerDescriptor, OwnerEntity,
    ResolvedOwner,
};

use crate::owners::EntityLoaderRegistry;
use crate::routes::RouteBuilder;

pub struct OwnerProjector {
    loaders: Arc<EntityLoaderRegistry>,
    routes: Arc<dyn RouteBuilder>,
    browser_route_prefixes: HashMap<String, String>,
}

impl OwnerProjector {
    pub fn new(
        loaders: Arc<EntityLoaderRegistry>,
        routes: Arc<dyn RouteBuilder>,
        config: &MediaLibraryConfig,
    ) -> Self {
        Self {
            loaders,
            routes,
            browser_route_prefixes: config.browser_route_prefixes.clone(),
        }
    }

    /// Project ownership records into descriptors. Output is stable-ordered
    /// and re-indexed: dropped records leave no gap. Only hard collaborator
    /// failures (e.g. lost connections) error out.
    pub async fn project(
        &self,
        records: &[Mediable],
    ) -> Result<Vec<OwnerDescriptor>, AppError> {
        let mut owners = Vec::with_capacity(records.len());

        for record in records {
            let Some(loader) = self.loaders.resolve(&record.mediable_type) else {
                tracing::debug!(
                    mediable_type = %record.mediable_type,
                    mediable_id = record.mediable_id,
                    "no loader registered for owner type, dropping record"
                );
                continue;
            };

            let Some(resolved) = loader.find_by_id(record.mediable_id).await? else {
                tracing::debug!(
                    mediable_type = %record.mediable_type,
                    mediable_id = record.mediable_id,
                    "owner entity no longer exists, dropping record"
                );
                continue;
            };

            // Blocks are proxies: substitute the parent entity, or drop the
            // record when the chain ends nowhere.
            let subject = match resolved {
                ResolvedOwner::Entity(entity) => entity,
                ResolvedOwner::Block {
                    parent: Some(parent),
                } => parent,
                ResolvedOwner::Block { parent: None } => {
                    tracing::debug!(
                        mediable_id = record.mediable_id,
                        "block owner has no parent entity, dropping record"
                    );
                    continue;
                }
            };

            owners.push(self.describe(subject));
        }

        Ok(owners)
    }

    fn describe(&self, subject: Arc<dyn OwnerEntity>) -> OwnerDescriptor {
        let module = inflect::module_name(subject.type_name());
        let title_key = subject.title_key().to_string();
        let name = subject
            .attribute(&title_key)
            .as_ref()
            .and_then(display_value)
            .unwrap_or_default();
        let prefix = self
            .browser_route_prefixes
            .get(&module)
            .map(String::as_str);
        let edit = self
            .routes
            .module_route(&module, prefix, "edit", subject.id());

        OwnerDescriptor {
            id: subject.id(),
            slug: subject.slug(),
            name,
            title_key,
            module,
            edit,
            entity: subject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owners::EntityLoader;
    use crate::routes::AdminRouteBuilder;
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::Value;

    #[derive(Debug)]
    struct TestEntity {
        id: i64,
        type_name: &'static str,
        title: &'static str,
        slug: Option<&'static str>,
    }

    impl OwnerEntity for TestEntity {
        fn id(&self) -> i64 {
            self.id
        }

        fn type_name(&self) -> &str {
            self.type_name
        }

        fn attribute(&self, name: &str) -> Option<Value> {
            (name == "title").then(|| Value::String(self.title.to_string()))
        }

        fn slug(&self) -> Option<String> {
            self.slug.map(|s| s.to_string())
        }
    }

    /// Loader backed by a fixed set of entities; ids not present are
    /// dangling references.
    struct MapLoader {
        entities: HashMap<i64, Arc<dyn OwnerEntity>>,
    }

    #[async_trait]
    impl EntityLoader for MapLoader {
        async fn find_by_id(&self, id: i64) -> Result<Option<ResolvedOwner>, AppError> {
            Ok(self
                .entities
                .get(&id)
                .cloned()
                .map(ResolvedOwner::Entity))
        }
    }

    /// Loader whose every entity is a block delegating to an optional parent.
    struct BlockLoader {
        parents: HashMap<i64, Option<Arc<dyn OwnerEntity>>>,
    }

    #[async_trait]
    impl EntityLoader for BlockLoader {
        async fn find_by_id(&self, id: i64) -> Result<Option<ResolvedOwner>, AppError> {
            Ok(self
                .parents
                .get(&id)
                .map(|parent| ResolvedOwner::Block {
                    parent: parent.clone(),
                }))
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl EntityLoader for FailingLoader {
        async fn find_by_id(&self, _id: i64) -> Result<Option<ResolvedOwner>, AppError> {
            Err(AppError::Internal("connection lost".to_string()))
        }
    }

    fn record(mediable_type: &str, mediable_id: i64) -> Mediable {
        Mediable {
            id: mediable_id,
            media_id: 1,
            mediable_type: mediable_type.to_string(),
            mediable_id,
            role: None,
            metadatas: "{}".to_string(),
            created_at: Utc::now(),
        }
    }

    fn article(id: i64, title: &'static str) -> Arc<dyn OwnerEntity> {
        Arc::new(TestEntity {
            id,
            type_name: "Article",
            title,
            slug: Some("hello-world"),
        })
    }

    fn projector_with(loaders: EntityLoaderRegistry) -> OwnerProjector {
        let config = MediaLibraryConfig {
            browser_route_prefixes: HashMap::from([(
                "articles".to_string(),
                "content".to_string(),
            )]),
            ..Default::default()
        };
        OwnerProjector::new(
            Arc::new(loaders),
            Arc::new(AdminRouteBuilder::new("/admin")),
            &config,
        )
    }

    #[tokio::test]
    async fn test_live_entity_projects_full_descriptor() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register(
            "articles",
            Arc::new(MapLoader {
                entities: HashMap::from([(5, article(5, "Hello"))]),
            }),
        );
        let projector = projector_with(registry);

        let owners = projector.project(&[record("articles", 5)]).await.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, 5);
        assert_eq!(owners[0].name, "Hello");
        assert_eq!(owners[0].title_key, "title");
        assert_eq!(owners[0].module, "articles");
        assert_eq!(owners[0].slug.as_deref(), Some("hello-world"));
        assert_eq!(owners[0].edit, "/admin/content/articles/5/edit");
    }

    #[tokio::test]
    async fn test_dangling_reference_dropped() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register(
            "articles",
            Arc::new(MapLoader {
                entities: HashMap::from([(5, article(5, "Hello"))]),
            }),
        );
        let projector = projector_with(registry);

        // One record points at a deleted entity, one at a live Article.
        let records = [record("articles", 404), record("articles", 5)];
        let owners = projector.project(&records).await.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, 5);
        assert_eq!(owners[0].name, "Hello");
    }

    #[tokio::test]
    async fn test_unmapped_type_tag_dropped() {
        let projector = projector_with(EntityLoaderRegistry::new());
        let owners = projector.project(&[record("mystery", 1)]).await.unwrap();
        assert!(owners.is_empty());
    }

    #[tokio::test]
    async fn test_block_delegates_to_parent() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register(
            "blocks",
            Arc::new(BlockLoader {
                parents: HashMap::from([(9, Some(article(5, "Hello")))]),
            }),
        );
        let projector = projector_with(registry);

        let owners = projector.project(&[record("blocks", 9)]).await.unwrap();
        assert_eq!(owners.len(), 1);
        // Module derives from the parent type, never from the block.
        assert_eq!(owners[0].module, "articles");
        assert_eq!(owners[0].id, 5);
    }

    #[tokio::test]
    async fn test_block_without_parent_dropped() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register(
            "blocks",
            Arc::new(BlockLoader {
                parents: HashMap::from([(9, None)]),
            }),
        );
        let projector = projector_with(registry);

        let records = [record("blocks", 9)];
        let owners = projector.project(&records).await.unwrap();
        // Sequence shrinks by exactly one versus the input.
        assert_eq!(owners.len(), records.len() - 1);
    }

    #[tokio::test]
    async fn test_output_is_reindexed_and_stable() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register(
            "articles",
            Arc::new(MapLoader {
                entities: HashMap::from([
                    (1, article(1, "First")),
                    (3, article(3, "Third")),
                ]),
            }),
        );
        let projector = projector_with(registry);

        let records = [
            record("articles", 1),
            record("articles", 2),
            record("articles", 3),
        ];
        let owners = projector.project(&records).await.unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].name, "First");
        assert_eq!(owners[1].name, "Third");
    }

    #[tokio::test]
    async fn test_loader_hard_failure_propagates() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register("articles", Arc::new(FailingLoader));
        let projector = projector_with(registry);

        let result = projector.project(&[record("articles", 1)]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_module_without_route_prefix() {
        let mut registry = EntityLoaderRegistry::new();
        registry.register(
            "caseStudies",
            Arc::new(MapLoader {
                entities: HashMap::from([(
                    2,
                    Arc::new(TestEntity {
                        id: 2,
                        type_name: "CaseStudy",
                        title: "Study",
                        slug: None,
                    }) as Arc<dyn OwnerEntity>,
                )]),
            }),
        );
        let projector = projector_with(registry);

        let owners = projector.project(&[record("caseStudies", 2)]).await.unwrap();
        assert_eq!(owners[0].module, "caseStudies");
        assert_eq!(owners[0].slug, None);
        assert_eq!(owners[0].edit, "/admin/caseStudies/2/edit");
    }
}
