//! Errors raised while building or rendering a statement.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("incomplete query: a statement needs at least one select expression")]
    IncompleteQuery,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{operation} is meaningless on an aggregate result")]
    UnsupportedOnAggregate { operation: &'static str },
    #[error("{operation} is not supported on {target}")]
    NotSupported {
        operation: &'static str,
        target: &'static str,
    },
}
