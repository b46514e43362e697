//! Newtypes for the names of entities and their properties.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The name of a mapped entity type, e.g. `Employee`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct EntityName(pub String);

/// The name of a property on an entity type, e.g. `name`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PropertyName(pub String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Self {
        EntityName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PropertyName {
    pub fn new(name: impl Into<String>) -> Self {
        PropertyName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityName {
    fn from(name: &str) -> Self {
        EntityName(name.to_string())
    }
}

impl From<&str> for PropertyName {
    fn from(name: &str) -> Self {
        PropertyName(name.to_string())
    }
}
