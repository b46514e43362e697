//! Metadata information regarding the mapped entity types.

pub mod database;

// re-export without modules
pub use database::*;

use query_engine_models::EntityName;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    pub entities: EntitiesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            entities: EntitiesInfo::empty(),
        }
    }

    /// Register the field mappings of an entity type.
    pub fn register<E: Entity>(&mut self) -> &mut Self {
        self.entities.0.insert(E::name(), E::info());
        self
    }

    /// Register field mappings under an explicit name.
    pub fn insert(&mut self, name: EntityName, info: EntityInfo) -> &mut Self {
        self.entities.0.insert(name, info);
        self
    }

    /// Lookup the field mappings of an entity type.
    pub fn lookup_entity(&self, name: &EntityName) -> Option<&EntityInfo> {
        self.entities.0.get(name)
    }
}

/// An entity type whose field mappings are declared once, in code.
pub trait Entity {
    /// The name the entity is registered under.
    fn name() -> EntityName;

    /// The field mappings of the entity, in declaration order.
    fn info() -> EntityInfo;
}
