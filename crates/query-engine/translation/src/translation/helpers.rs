//! Helpers for processing the query and building the operations.

use query_engine_metadata::metadata::{EntityInfo, Metadata};
use query_engine_models::EntityName;

use super::error::Error;

/// Static information from the query and metadata.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    metadata: &'a Metadata,
    root_entity: &'a EntityName,
    count_override: Option<&'a str>,
}

impl<'a> Env<'a> {
    /// Create a new Env by supplying the metadata and the entity the query starts at.
    pub fn new(metadata: &'a Metadata, root_entity: &'a EntityName) -> Self {
        Env {
            metadata,
            root_entity,
            count_override: None,
        }
    }

    /// Count with this SQL instead of the translated statement.
    #[must_use]
    pub fn with_count_override(self, count_override: Option<&'a str>) -> Self {
        Env {
            count_override,
            ..self
        }
    }

    /// Lookup the field mappings of an entity.
    pub fn lookup_entity(&self, name: &EntityName) -> Result<&'a EntityInfo, Error> {
        self.metadata
            .lookup_entity(name)
            .ok_or_else(|| Error::EntityNotFound(name.clone()))
    }

    pub fn root_entity(&self) -> &'a EntityName {
        self.root_entity
    }

    pub fn count_override(&self) -> Option<&'a str> {
        self.count_override
    }
}
