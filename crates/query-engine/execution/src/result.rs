//! What executing a query produces.

use query_engine_models::EntityName;

use crate::error::Error;

/// Rows materialized as one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Rows<T> {
    /// The entity type the rows are labelled as, which a cast changes.
    pub entity: EntityName,
    pub items: Vec<T>,
}

/// The result of executing a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    Rows(Rows<T>),
    Count(u64),
    Element(T),
    /// Every operation of a failover failed.
    Empty,
}

impl<T> QueryResult<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryResult::Rows(_) => "rows",
            QueryResult::Count(_) => "a count",
            QueryResult::Element(_) => "an element",
            QueryResult::Empty => "nothing",
        }
    }

    pub fn into_rows(self) -> Result<Rows<T>, Error> {
        match self {
            QueryResult::Rows(rows) => Ok(rows),
            other => Err(other.unexpected("rows")),
        }
    }

    /// The materialized objects, however many the query returned.
    pub fn into_items(self) -> Result<Vec<T>, Error> {
        match self {
            QueryResult::Rows(rows) => Ok(rows.items),
            QueryResult::Element(item) => Ok(vec![item]),
            QueryResult::Empty => Ok(vec![]),
            other @ QueryResult::Count(_) => Err(other.unexpected("rows")),
        }
    }

    pub fn into_count(self) -> Result<u64, Error> {
        match self {
            QueryResult::Count(count) => Ok(count),
            other => Err(other.unexpected("a count")),
        }
    }

    pub fn into_element(self) -> Result<T, Error> {
        match self {
            QueryResult::Element(item) => Ok(item),
            other => Err(other.unexpected("an element")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> Error {
        Error::UnexpectedResult {
            expected,
            found: self.kind(),
        }
    }
}
