//! Execute an operation chain against the database.

use query_engine_metadata::metadata::Metadata;
use query_engine_models::{EntityName, Query};
use query_engine_sql::sql;
use query_engine_translation::translation::query::Operation;

use crate::connection::{ConnectionFactory, Params};
use crate::error::Error;
use crate::materializer::{Materializable, Materializer};
use crate::result::{QueryResult, Rows};

/// What an execution needs besides the operation itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub connections: &'a dyn ConnectionFactory,
    pub metadata: &'a Metadata,
    /// The entity type rows are materialized as.
    pub entity: &'a EntityName,
    pub parameters: &'a Params,
}

/// Executes whole queries. `ElementAt` hands its source query back through this, so
/// that the rows can come from wherever the caller keeps them.
pub trait Submit<T> {
    fn submit(&mut self, query: &Query) -> Result<QueryResult<T>, Error>;
}

/// Execute an operation. Each statement runs on its own connection, which is released
/// before this returns, whether or not it succeeds.
pub fn execute<T: Materializable>(
    context: &Context,
    operation: Operation,
    submit: &mut dyn Submit<T>,
) -> Result<QueryResult<T>, Error> {
    match operation {
        Operation::Read(select) => {
            let query = select.query_sql()?;
            let items = read_rows(context, &query.sql)?;
            Ok(QueryResult::Rows(Rows {
                entity: context.entity.clone(),
                items,
            }))
        }

        Operation::Fixed(sql) => {
            let items = read_rows(context, &sql)?;
            Ok(QueryResult::Rows(Rows {
                entity: context.entity.clone(),
                items,
            }))
        }

        Operation::Aggregate(inner) => {
            let sql = match *inner {
                Operation::Read(select) => select.query_sql()?.sql,
                Operation::Fixed(sql) => sql,
                other => {
                    return Err(Error::Sql(sql::error::Error::NotSupported {
                        operation: "aggregate",
                        target: other.kind(),
                    }))
                }
            };
            Ok(QueryResult::Count(read_count(context, &sql)?))
        }

        Operation::Cast { inner, from, to } => match execute(context, *inner, submit)? {
            QueryResult::Rows(rows) => {
                tracing::debug!(from = %from, to = %to, rows = rows.items.len(), "Cast rows");
                Ok(QueryResult::Rows(Rows {
                    entity: to,
                    items: rows.items,
                }))
            }
            other => Ok(other),
        },

        Operation::ElementAt { query, offset } => {
            let items = submit.submit(&query)?.into_items()?;
            let index = usize::try_from(offset).unwrap_or(usize::MAX);
            let len = items.len();
            items
                .into_iter()
                .nth(index)
                .map(QueryResult::Element)
                .ok_or(Error::IndexOutOfRange { index, len })
        }

        Operation::Failover(operations) => {
            let attempts = operations.len();
            for (attempt, operation) in operations.into_iter().enumerate() {
                match execute(context, operation, submit) {
                    Ok(result) => return Ok(result),
                    Err(err) => {
                        tracing::warn!(attempt, attempts, error = %err, "Failover attempt failed");
                    }
                }
            }
            Ok(QueryResult::Empty)
        }
    }
}

/// Run a statement and materialize every row it returns.
fn read_rows<T: Materializable>(context: &Context, sql: &str) -> Result<Vec<T>, Error> {
    tracing::info!(
        generated_sql = sql,
        params = ?context.parameters.keys().collect::<Vec<_>>()
    );

    let mut connection = context.connections.open()?;
    let mut statement = connection.create_statement(sql, context.parameters)?;
    let mut rows = statement.execute()?;

    let items = Materializer::new(context.metadata, context.entity).materialize(rows.as_mut())?;
    tracing::debug!(rows = items.len(), "Materialized rows");
    Ok(items)
}

/// Run a counting statement and read the count from its only row.
fn read_count(context: &Context, sql: &str) -> Result<u64, Error> {
    tracing::info!(
        generated_sql = sql,
        params = ?context.parameters.keys().collect::<Vec<_>>()
    );

    let mut connection = context.connections.open()?;
    let mut statement = connection.create_statement(sql, context.parameters)?;
    let mut rows = statement.execute()?;

    if !rows.advance()? {
        return Err(Error::BadResultSet);
    }
    let value = rows.read_column(sql::helpers::COUNT_COLUMN)?;
    let count = match &value {
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    count.ok_or_else(|| Error::Conversion {
        column: sql::helpers::COUNT_COLUMN.to_string(),
        expected: "integer",
        value: value.to_string(),
    })
}
