//! Errors for query translation.

use query_engine_models::{EntityName, PropertyName};
use query_engine_sql::sql;
use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity '{0}' not found")]
    EntityNotFound(EntityName),
    #[error("member '{property}' of entity '{entity}' has no field mapping")]
    UnsupportedMember {
        entity: EntityName,
        property: PropertyName,
    },
    #[error("{operator} only accepts a non-negative integer literal, got {argument}")]
    UnsupportedOperatorArgument {
        operator: &'static str,
        argument: String,
    },
    #[error("queries containing {0} are not supported")]
    NotSupported(String),
    #[error(transparent)]
    Sql(#[from] sql::error::Error),
}
