//! Translate an operator tree into an operation chain and the statement it runs.

pub mod sorting;
pub mod values;

use query_engine_models::Query;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// The operations a translated query executes as. `ElementAt` keeps its source query.
pub type Operation = sql::execution_plan::Operation<Query>;

/// Translate a query, starting from `base`, which normally reads the rows of the
/// baseline statement.
///
/// The statement inside `base` is modified as the tree is walked, so callers hand in
/// their own copy of it.
pub fn translate(env: &Env, query: &Query, base: Operation) -> Result<Operation, Error> {
    let operation = translate_query(env, query, base)?;
    tracing::debug!(
        operation = operation.kind(),
        query = query.operator_name(),
        "Translated query"
    );
    Ok(operation)
}

/// Translate the child of a node before the node itself, threading the operation
/// built so far through the walk.
fn translate_query(env: &Env, query: &Query, current: Operation) -> Result<Operation, Error> {
    match query {
        Query::Source => Ok(current),

        Query::OrderBy { source, key } | Query::ThenBy { source, key } => {
            let mut operation = translate_query(env, source, current)?;
            let target = sorting::translate_key_path(env, key)?;
            let kind = operation.kind();
            let select = operation
                .select_mut()
                .ok_or_else(|| Error::NotSupported(format!("ordering a {kind} operation")))?;
            select.add_order_by(target, sql::ast::OrderByDirection::Asc);
            Ok(operation)
        }

        Query::Count { source } => match env.count_override() {
            // The override replaces whatever was built for the source.
            Some(count_sql) => Ok(Operation::aggregate(Operation::Fixed(
                count_sql.to_string(),
            ))?),
            None => {
                let operation = translate_query(env, source, current)?;
                into_aggregate(operation)
            }
        },

        Query::Cast { source, to } => {
            let operation = translate_query(env, source, current)?;
            let from = match &operation {
                Operation::Cast { to, .. } => to.clone(),
                _ => env.root_entity().clone(),
            };
            Ok(Operation::cast(operation, from, to.clone()))
        }

        Query::Skip { source, count } => {
            let mut operation = translate_query(env, source, current)?;
            operation.set_skip(values::translate_count_argument("Skip", count)?)?;
            Ok(operation)
        }

        Query::Take { source, count } => {
            let mut operation = translate_query(env, source, current)?;
            operation.set_take(values::translate_count_argument("Take", count)?)?;
            Ok(operation)
        }

        // The source is translated when the element is fetched, so that it can be
        // answered from the cache.
        Query::ElementAt { source, index } => Ok(Operation::ElementAt {
            query: source.as_ref().clone(),
            offset: values::translate_count_argument("ElementAt", index)?,
        }),
    }
}

/// Count the rows an operation would read.
fn into_aggregate(operation: Operation) -> Result<Operation, Error> {
    match operation {
        Operation::Read(mut select) => {
            select.set_count_mode();
            Ok(Operation::aggregate(Operation::Read(select))?)
        }
        // Counting does not depend on the entity type rows are labelled with.
        Operation::Cast { inner, .. } => into_aggregate(*inner),
        other => Ok(Operation::aggregate(other)?),
    }
}
