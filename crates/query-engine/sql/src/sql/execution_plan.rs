//! The chain of operations a translated query is executed as.
//!
//! `Q` is the query type an `ElementAt` operation keeps around untranslated, so that it
//! can be handed back to whoever executes queries when the operation runs.

use query_engine_models::EntityName;

use super::ast::Select;
use super::error::Error;
use super::string::SQL;

/// An operation to run against the database, possibly wrapping other operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<Q> {
    /// Run a statement and materialize every row it returns.
    Read(Select),
    /// Run a counting statement and return the count.
    Aggregate(Box<Operation<Q>>),
    /// Run the inner operation and relabel its rows as another entity type.
    Cast {
        inner: Box<Operation<Q>>,
        from: EntityName,
        to: EntityName,
    },
    /// Execute a query and pick a single element out of its rows.
    ElementAt { query: Q, offset: u32 },
    /// Run a literal SQL statement, ignoring the statement model.
    Fixed(String),
    /// Run each operation in turn until one succeeds.
    Failover(Vec<Operation<Q>>),
}

impl<Q> Operation<Q> {
    /// Count the results of a `Read` or `Fixed` operation.
    pub fn aggregate(inner: Operation<Q>) -> Result<Self, Error> {
        match inner {
            Operation::Read(_) | Operation::Fixed(_) => Ok(Operation::Aggregate(Box::new(inner))),
            other => Err(Error::NotSupported {
                operation: "aggregate",
                target: other.kind(),
            }),
        }
    }

    pub fn cast(inner: Operation<Q>, from: EntityName, to: EntityName) -> Self {
        Operation::Cast {
            inner: Box::new(inner),
            from,
            to,
        }
    }

    /// A short name for the kind of operation, for errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Read(_) => "read",
            Operation::Aggregate(_) => "aggregate",
            Operation::Cast { .. } => "cast",
            Operation::ElementAt { .. } => "element at",
            Operation::Fixed(_) => "fixed sql",
            Operation::Failover(_) => "failover",
        }
    }

    /// Skip the first `skip` rows of the result.
    pub fn set_skip(&mut self, skip: u32) -> Result<(), Error> {
        self.limit_with("skip", &mut |select| {
            select.set_skip(skip);
        })
    }

    /// Return at most `take` rows.
    pub fn set_take(&mut self, take: u32) -> Result<(), Error> {
        self.limit_with("take", &mut |select| {
            select.set_take(take);
        })
    }

    fn limit_with(
        &mut self,
        operation: &'static str,
        apply: &mut dyn FnMut(&mut Select),
    ) -> Result<(), Error> {
        let target = self.kind();
        match self {
            Operation::Read(select) => {
                apply(select);
                Ok(())
            }
            Operation::Aggregate(_) => Err(Error::UnsupportedOnAggregate { operation }),
            Operation::Cast { inner, .. } => inner.limit_with(operation, apply),
            Operation::Failover(operations) => operations
                .iter_mut()
                .try_for_each(|inner| inner.limit_with(operation, apply)),
            Operation::ElementAt { .. } | Operation::Fixed(_) => {
                Err(Error::NotSupported { operation, target })
            }
        }
    }

    /// The statement rows are read with, if the operation still has one to extend.
    pub fn select_mut(&mut self) -> Option<&mut Select> {
        match self {
            Operation::Read(select) => Some(select),
            Operation::Cast { inner, .. } => inner.select_mut(),
            Operation::Aggregate(_)
            | Operation::ElementAt { .. }
            | Operation::Fixed(_)
            | Operation::Failover(_) => None,
        }
    }

    /// The SQL this operation sends to the database, when it sends a single statement.
    pub fn query_sql(&self) -> Result<Option<SQL>, Error> {
        match self {
            Operation::Read(select) => select.query_sql().map(Some),
            Operation::Aggregate(inner) | Operation::Cast { inner, .. } => inner.query_sql(),
            Operation::Fixed(sql) => Ok(Some(SQL { sql: sql.clone() })),
            Operation::ElementAt { .. } | Operation::Failover(_) => Ok(None),
        }
    }
}
