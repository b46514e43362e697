//! The request vocabulary of the query engine: the operator tree describing a query,
//! the key paths used to order it, and the names shared with the metadata.

pub mod names;
pub mod query;

pub use names::{EntityName, PropertyName};
pub use query::{Argument, KeyPath, Literal, OrderDirection, Query};
