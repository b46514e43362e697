//! Execute operator trees against a relational database, lazily and at most once.
//!
//! A [`Provider`] owns a connection factory, the runtime configuration and a cache of
//! results keyed by the query tree. Each uncached query is translated against a copy of
//! the baseline statement, executed, and remembered.

pub mod explain;
pub mod provider;

pub use explain::Explanation;
pub use provider::Provider;

pub use lazy_query_configuration::Configuration;
pub use query_engine_execution::connection::{
    Connection, ConnectionFactory, DatabaseError, Params, RowSource, Statement,
};
pub use query_engine_execution::error::Error;
pub use query_engine_execution::materializer::{FieldValue, Materializable, NestedRow};
pub use query_engine_execution::result::{QueryResult, Rows};
pub use query_engine_models::{Argument, EntityName, KeyPath, PropertyName, Query};
pub use query_engine_translation::translation::query::Operation;
