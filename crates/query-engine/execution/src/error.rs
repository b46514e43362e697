//! Errors for query execution.

use query_engine_models::{EntityName, PropertyName};
use query_engine_sql::sql;
use query_engine_translation::translation;

use crate::connection::DatabaseError;

/// Query planning and execution error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the count statement returned no rows")]
    BadResultSet,
    #[error("index {index} is out of range for {len} rows")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot convert {value} in column '{column}' to {expected}")]
    Conversion {
        column: String,
        expected: &'static str,
        value: String,
    },
    #[error("expected a field of type {expected}, got {found}")]
    FieldType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("no property '{0}' to assign to")]
    UnknownProperty(PropertyName),
    #[error("entity '{0}' not found")]
    EntityNotFound(EntityName),
    #[error("expected {expected}, the query returned {found}")]
    UnexpectedResult {
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Sql(#[from] sql::error::Error),
    #[error(transparent)]
    Translation(#[from] translation::error::Error),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}
