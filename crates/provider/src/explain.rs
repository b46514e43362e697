//! Describe how a query would be executed, without executing it.

use std::collections::BTreeMap;

use query_engine_execution::error::Error;
use query_engine_execution::materializer::Materializable;
use query_engine_models::Query;
use query_engine_translation::translation::query::Operation;

use crate::provider::Provider;

/// The details of an explained query.
///
/// `"SQL Query"` holds the formatted statement and `"Operations"` the chain of
/// operations it runs in, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub details: BTreeMap<String, String>,
}

impl<T: Materializable + Clone> Provider<T> {
    /// Translate a query and describe what executing it would do.
    pub fn explain(&self, query: &Query) -> Result<Explanation, Error> {
        let span = tracing::info_span!("Explain query", query = query.operator_name());
        let _enter = span.enter();

        let operation = self.translate(query)?;
        let sql = self.operation_text(&operation)?;
        let pretty = sqlformat::format(
            &sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        );
        tracing::info!(generated_sql = sql, "Explained query");

        let details = BTreeMap::from_iter([
            ("SQL Query".into(), pretty),
            ("Operations".into(), operation_chain(&operation).join(" > ")),
        ]);
        Ok(Explanation { details })
    }
}

/// The kinds of the operations in a chain, outermost first. Failover alternatives are
/// listed in brackets.
fn operation_chain(operation: &Operation) -> Vec<String> {
    let mut chain = vec![];
    let mut current = Some(operation);
    while let Some(operation) = current {
        current = match operation {
            Operation::Aggregate(inner) | Operation::Cast { inner, .. } => {
                chain.push(operation.kind().to_string());
                Some(inner.as_ref())
            }
            Operation::Failover(operations) => {
                let alternatives: Vec<String> = operations
                    .iter()
                    .map(|alternative| operation_chain(alternative).join(" > "))
                    .collect();
                chain.push(format!("failover [{}]", alternatives.join(" | ")));
                None
            }
            Operation::Read(_) | Operation::ElementAt { .. } | Operation::Fixed(_) => {
                chain.push(operation.kind().to_string());
                None
            }
        };
    }
    chain
}
