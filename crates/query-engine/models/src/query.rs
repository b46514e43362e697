//! The operator tree of a query.
//!
//! A query is a chain of operators ending in a `Source`. Each operator wraps exactly one
//! child, its `source`. Trees are immutable once built and compare structurally, which is
//! what the provider uses as the identity of a query.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::names::{EntityName, PropertyName};

/// A node of the operator tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// The rows described by the provider's baseline statement.
    Source,
    /// Order by a key. The first ordering of the chain.
    OrderBy { source: Box<Query>, key: KeyPath },
    /// Order by an additional key.
    ThenBy { source: Box<Query>, key: KeyPath },
    /// Count the rows instead of fetching them.
    Count { source: Box<Query> },
    /// Reinterpret the rows as another entity type.
    Cast { source: Box<Query>, to: EntityName },
    /// Skip a number of rows.
    Skip { source: Box<Query>, count: Argument },
    /// Take at most a number of rows.
    Take { source: Box<Query>, count: Argument },
    /// Fetch the single row at an offset.
    ElementAt { source: Box<Query>, index: Argument },
}

/// The body of a key selector such as `x => x.main_supplier.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyPath {
    /// The selector's parameter, i.e. the root entity.
    Parameter,
    /// A property access on another path.
    Member {
        object: Box<KeyPath>,
        property: PropertyName,
    },
}

/// An operator argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Argument {
    Literal { value: Literal },
    Variable { name: String },
}

/// A literal argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
}

/// The direction of an ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl Query {
    /// The root of every operator tree.
    pub fn source() -> Self {
        Query::Source
    }

    pub fn order_by(self, key: KeyPath) -> Self {
        Query::OrderBy {
            source: Box::new(self),
            key,
        }
    }

    pub fn then_by(self, key: KeyPath) -> Self {
        Query::ThenBy {
            source: Box::new(self),
            key,
        }
    }

    pub fn count(self) -> Self {
        Query::Count {
            source: Box::new(self),
        }
    }

    pub fn cast(self, to: impl Into<EntityName>) -> Self {
        Query::Cast {
            source: Box::new(self),
            to: to.into(),
        }
    }

    pub fn skip(self, count: i64) -> Self {
        Query::Skip {
            source: Box::new(self),
            count: Argument::integer(count),
        }
    }

    pub fn take(self, count: i64) -> Self {
        Query::Take {
            source: Box::new(self),
            count: Argument::integer(count),
        }
    }

    pub fn element_at(self, index: i64) -> Self {
        Query::ElementAt {
            source: Box::new(self),
            index: Argument::integer(index),
        }
    }

    /// The child of this node, `None` for `Source`.
    pub fn child(&self) -> Option<&Query> {
        match self {
            Query::Source => None,
            Query::OrderBy { source, .. }
            | Query::ThenBy { source, .. }
            | Query::Count { source }
            | Query::Cast { source, .. }
            | Query::Skip { source, .. }
            | Query::Take { source, .. }
            | Query::ElementAt { source, .. } => Some(source),
        }
    }

    /// The name of the operator, used in logs and error messages.
    pub fn operator_name(&self) -> &'static str {
        match self {
            Query::Source => "Source",
            Query::OrderBy { .. } => "OrderBy",
            Query::ThenBy { .. } => "ThenBy",
            Query::Count { .. } => "Count",
            Query::Cast { .. } => "Cast",
            Query::Skip { .. } => "Skip",
            Query::Take { .. } => "Take",
            Query::ElementAt { .. } => "ElementAt",
        }
    }
}

impl KeyPath {
    /// The selector's parameter.
    pub fn root() -> Self {
        KeyPath::Parameter
    }

    /// Access a property on this path.
    pub fn member(self, property: impl Into<PropertyName>) -> Self {
        KeyPath::Member {
            object: Box::new(self),
            property: property.into(),
        }
    }
}

impl Argument {
    pub fn integer(value: i64) -> Self {
        Argument::Literal {
            value: Literal::Integer(value),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPath::Parameter => f.write_str("x"),
            KeyPath::Member { object, property } => write!(f, "{object}.{property}"),
        }
    }
}
