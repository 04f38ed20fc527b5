use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// A content entity capable of owning media assets.
///
/// Concrete entity types declare their display-name attribute via
/// [`title_key`](OwnerEntity::title_key) and opt into the slugging capability
/// by overriding [`slug`](OwnerEntity::slug); the default of `None` means the
/// type has no slugs. This replaces the runtime trait inspection the admin UI
/// used to rely on with explicit interface conformance.
pub trait OwnerEntity: fmt::Debug + Send + Sync {
    fn id(&self) -> i64;

    /// Short CamelCase type name, e.g. `Article`. Module names derive from
    /// this.
    fn type_name(&self) -> &str;

    /// Name of the attribute holding the display name.
    fn title_key(&self) -> &str {
        "title"
    }

    /// Attribute lookup by name, as a JSON value.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Slug of this entity, for types supporting the slugging capability.
    fn slug(&self) -> Option<String> {
        None
    }
}

/// Result of loading an owner entity by id. Blocks are proxies: their true
/// owner is the parent entity they belong to, resolved at load time. A block
/// with no parent owns nothing.
#[derive(Debug, Clone)]
pub enum ResolvedOwner {
    Entity(Arc<dyn OwnerEntity>),
    Block {
        parent: Option<Arc<dyn OwnerEntity>>,
    },
}

/// Normalized, read-only projection of a resolved owner. Built only for
/// entities that actually resolved; no partial descriptors exist.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerDescriptor {
    pub id: i64,
    pub slug: Option<String>,
    pub name: String,
    #[serde(rename = "titleKey")]
    pub title_key: String,
    pub module: String,
    /// Admin edit-link URL for the owner.
    pub edit: String,
    /// The underlying resolved entity, not serialized.
    #[serde(skip)]
    pub entity: Arc<dyn OwnerEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Article {
        id: i64,
        title: String,
    }

    impl OwnerEntity for Article {
        fn id(&self) -> i64 {
            self.id
        }

        fn type_name(&self) -> &str {
            "Article"
        }

        fn attribute(&self, name: &str) -> Option<Value> {
            (name == "title").then(|| Value::String(self.title.clone()))
        }

        fn slug(&self) -> Option<String> {
            Some(format!("article-{}", self.id))
        }
    }

    #[test]
    fn test_descriptor_serializes_without_entity() {
        let entity: Arc<dyn OwnerEntity> = Arc::new(Article {
            id: 5,
            title: "Hello".to_string(),
        });
        let descriptor = OwnerDescriptor {
            id: 5,
            slug: entity.slug(),
            name: "Hello".to_string(),
            title_key: "title".to_string(),
            module: "articles".to_string(),
            edit: "/admin/articles/5/edit".to_string(),
            entity,
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["titleKey"], "title");
        assert_eq!(json["slug"], "article-5");
        assert!(json.get("entity").is_none());
    }

    #[test]
    fn test_default_capabilities() {
        #[derive(Debug)]
        struct Bare;
        impl OwnerEntity for Bare {
            fn id(&self) -> i64 {
                1
            }
            fn type_name(&self) -> &str {
                "Bare"
            }
            fn attribute(&self, _name: &str) -> Option<Value> {
                None
            }
        }

        let bare = Bare;
        assert_eq!(bare.title_key(), "title");
        assert!(bare.slug().is_none());
    }
}
