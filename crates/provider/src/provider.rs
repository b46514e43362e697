//! The provider loop: translate, execute and cache.

use std::collections::HashMap;

use lazy_query_configuration::Configuration;
use query_engine_execution::connection::ConnectionFactory;
use query_engine_execution::error::Error;
use query_engine_execution::execution::{self, Context, Submit};
use query_engine_execution::materializer::Materializable;
use query_engine_execution::result::QueryResult;
use query_engine_models::Query;
use query_engine_sql::sql;
use query_engine_translation::translation;
use query_engine_translation::translation::helpers::Env;
use query_engine_translation::translation::query::Operation;

/// Executes queries for one entity type, remembering each result.
///
/// Results are cached under the query tree itself, so two structurally equal trees
/// share one execution. Failed executions are not cached. A provider is meant to be
/// used from a single thread.
pub struct Provider<T> {
    engine: Engine,
    cache: HashMap<Query, QueryResult<T>>,
}

/// Everything about a provider except its cache.
struct Engine {
    connections: Box<dyn ConnectionFactory>,
    configuration: Configuration,
}

/// A provider borrowed for the duration of one top-level execution. `ElementAt`
/// operations hand their source query back to it.
struct Session<'p, T> {
    engine: &'p Engine,
    cache: &'p mut HashMap<Query, QueryResult<T>>,
}

impl<T: Materializable + Clone> Provider<T> {
    pub fn new(connections: impl ConnectionFactory + 'static, configuration: Configuration) -> Self {
        Provider {
            engine: Engine {
                connections: Box::new(connections),
                configuration,
            },
            cache: HashMap::new(),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.engine.configuration
    }

    /// Execute a query, or return its result from the cache.
    pub fn execute(&mut self, query: &Query) -> Result<QueryResult<T>, Error> {
        self.session().execute(query)
    }

    /// Run an operation built by the caller, such as a failover over translated
    /// operations. The result is not cached.
    pub fn execute_operation(&mut self, operation: Operation) -> Result<QueryResult<T>, Error> {
        self.session().run(operation)
    }

    /// Translate a query against a fresh copy of the baseline statement.
    pub fn translate(&self, query: &Query) -> Result<Operation, Error> {
        Ok(self.engine.translate(query)?)
    }

    /// The SQL executing `query` would send, without sending it.
    ///
    /// An `ElementAt` query is described by the statement of its source.
    pub fn query_text(&self, query: &Query) -> Result<String, Error> {
        let operation = self.engine.translate(query)?;
        self.engine.statement_text(&operation)
    }

    /// The SQL a translated operation sends. Failover is described by its first
    /// alternative.
    pub(crate) fn operation_text(&self, operation: &Operation) -> Result<String, Error> {
        self.engine.statement_text(operation)
    }

    /// Replace the SQL used for counting. Cached results are discarded.
    pub fn set_count_override(&mut self, count_sql: Option<String>) {
        self.engine.configuration.count_override = count_sql;
        self.clear_cache();
    }

    /// Set a named statement parameter. Cached results are discarded.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.engine
            .configuration
            .parameters
            .insert(name.into(), value);
        self.clear_cache();
    }

    pub fn clear_cache(&mut self) {
        tracing::debug!(entries = self.cache.len(), "Clearing query cache");
        self.cache.clear();
    }

    /// The queries whose results are cached, in no particular order.
    pub fn cached_queries(&self) -> impl Iterator<Item = &Query> {
        self.cache.keys()
    }

    fn session(&mut self) -> Session<'_, T> {
        Session {
            engine: &self.engine,
            cache: &mut self.cache,
        }
    }
}

impl Engine {
    fn translate(&self, query: &Query) -> Result<Operation, translation::error::Error> {
        let configuration = &self.configuration;
        let env = Env::new(&configuration.metadata, &configuration.root_entity)
            .with_count_override(configuration.count_override.as_deref());
        let base = Operation::Read(configuration.baseline.clone());
        translation::query::translate(&env, query, base)
    }

    fn context(&self) -> Context<'_> {
        Context {
            connections: self.connections.as_ref(),
            metadata: &self.configuration.metadata,
            entity: &self.configuration.root_entity,
            parameters: &self.configuration.parameters,
        }
    }

    fn statement_text(&self, operation: &Operation) -> Result<String, Error> {
        match operation {
            Operation::ElementAt { query, .. } => {
                let source = self.translate(query)?;
                self.statement_text(&source)
            }
            Operation::Cast { inner, .. } => self.statement_text(inner),
            Operation::Failover(operations) => match operations.first() {
                Some(first) => self.statement_text(first),
                None => Err(Error::Sql(sql::error::Error::IncompleteQuery)),
            },
            Operation::Read(_) | Operation::Aggregate(_) | Operation::Fixed(_) => operation
                .query_sql()?
                .map(|sql| sql.sql)
                .ok_or(Error::Sql(sql::error::Error::IncompleteQuery)),
        }
    }
}

impl<T: Materializable + Clone> Session<'_, T> {
    fn execute(&mut self, query: &Query) -> Result<QueryResult<T>, Error> {
        if let Some(result) = self.cache.get(query) {
            tracing::debug!(query = query.operator_name(), "Query cache hit");
            return Ok(result.clone());
        }
        tracing::debug!(query = query.operator_name(), "Query cache miss");

        let span = tracing::info_span!("Execute query", query = query.operator_name());
        let _enter = span.enter();

        let operation = self.engine.translate(query)?;
        let result = self.run(operation)?;
        self.cache.insert(query.clone(), result.clone());
        Ok(result)
    }

    fn run(&mut self, operation: Operation) -> Result<QueryResult<T>, Error> {
        let engine = self.engine;
        execution::execute(&engine.context(), operation, self)
    }
}

impl<T: Materializable + Clone> Submit<T> for Session<'_, T> {
    fn submit(&mut self, query: &Query) -> Result<QueryResult<T>, Error> {
        self.execute(query)
    }
}
