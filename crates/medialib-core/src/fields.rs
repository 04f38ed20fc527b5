//! Field registry
//!
//! Resolves, once at startup, which extra metadata fields exist and which
//! fields are translatable. The registry is immutable for the lifetime of the
//! process; every asset carries the same set of optional extra fields.

use std::collections::HashSet;

use crate::config::MediaLibraryConfig;

#[derive(Clone, Debug, Default)]
pub struct FieldRegistry {
    extra_field_names: Vec<String>,
    translatable: HashSet<String>,
}

impl FieldRegistry {
    pub fn from_config(config: &MediaLibraryConfig) -> Self {
        FieldRegistry {
            extra_field_names: config
                .extra_fields
                .iter()
                .map(|field| field.name.clone())
                .collect(),
            translatable: config.translatable_fields.iter().cloned().collect(),
        }
    }

    /// Extra metadata field names, in configuration order.
    pub fn extra_field_names(&self) -> &[String] {
        &self.extra_field_names
    }

    pub fn is_translatable(&self, field: &str) -> bool {
        self.translatable.contains(field)
    }
}
