//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use query_engine_models::EntityName;
use query_engine_sql::sql;

/// The errors that can be thrown when parsing the configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unsupported configuration version {0}")]
    UnsupportedVersion(u32),

    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing the configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The errors that can be thrown when turning a parsed configuration into the runtime one.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("the root entity '{0}' is not described in the metadata")]
    UnknownRootEntity(EntityName),

    #[error("the baseline selects the entity '{0}', which is not described in the metadata")]
    UnknownEntity(EntityName),

    #[error("invalid baseline statement: {0}")]
    InvalidBaseline(#[from] sql::error::Error),
}
