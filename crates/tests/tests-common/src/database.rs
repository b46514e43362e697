//! An in-memory database answering statements with scripted responses.
//!
//! Responses are consumed in order, one per executed statement. Once the script runs
//! out every statement returns no rows. Every statement is recorded, and connections
//! are counted as they are opened and released.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use query_engine_execution::connection::{
    Connection, ConnectionFactory, DatabaseError, Params, RowSource, Statement,
};

/// A single row, keyed by column name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A statement the database was asked to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub sql: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
enum Response {
    Rows(Vec<Row>),
    Error(String),
}

#[derive(Debug, Default)]
struct State {
    script: VecDeque<Response>,
    executed: Vec<ExecutedStatement>,
    opened: usize,
    released: usize,
    refuse_connections: bool,
}

/// A handle to the database. Clones share the same state, so a test can keep one
/// while the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct MockDatabase {
    state: Rc<RefCell<State>>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next statement with these rows. Each row is a JSON object.
    ///
    /// # Panics
    ///
    /// When a row is not an object.
    pub fn respond_with_rows(&self, rows: Vec<serde_json::Value>) -> &Self {
        let rows = rows
            .into_iter()
            .map(|row| match row {
                serde_json::Value::Object(row) => row,
                other => panic!("a row must be a JSON object, got {other}"),
            })
            .collect();
        self.state.borrow_mut().script.push_back(Response::Rows(rows));
        self
    }

    /// Answer the next counting statement.
    pub fn respond_with_count(&self, count: u64) -> &Self {
        self.respond_with_rows(vec![serde_json::json!({ "numrows": count })])
    }

    /// Fail the next statement.
    pub fn respond_with_error(&self, message: &str) -> &Self {
        self.state
            .borrow_mut()
            .script
            .push_back(Response::Error(message.to_string()));
        self
    }

    /// Fail to open connections from now on.
    pub fn refuse_connections(&self) -> &Self {
        self.state.borrow_mut().refuse_connections = true;
        self
    }

    pub fn executed(&self) -> Vec<ExecutedStatement> {
        self.state.borrow().executed.clone()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.state
            .borrow()
            .executed
            .iter()
            .map(|statement| statement.sql.clone())
            .collect()
    }

    pub fn opened_connections(&self) -> usize {
        self.state.borrow().opened
    }

    pub fn released_connections(&self) -> usize {
        self.state.borrow().released
    }

    /// Responses that no statement has consumed yet.
    pub fn pending_responses(&self) -> usize {
        self.state.borrow().script.len()
    }
}

impl ConnectionFactory for MockDatabase {
    fn open(&self) -> Result<Box<dyn Connection>, DatabaseError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_connections {
            return Err(DatabaseError::new("connection refused"));
        }
        state.opened += 1;
        Ok(Box::new(MockConnection {
            state: Rc::clone(&self.state),
        }))
    }
}

struct MockConnection {
    state: Rc<RefCell<State>>,
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        self.state.borrow_mut().released += 1;
    }
}

impl Connection for MockConnection {
    fn create_statement<'c>(
        &'c mut self,
        sql: &str,
        params: &Params,
    ) -> Result<Box<dyn Statement + 'c>, DatabaseError> {
        Ok(Box::new(MockStatement {
            connection: self,
            statement: ExecutedStatement {
                sql: sql.to_string(),
                params: params.clone(),
            },
        }))
    }
}

struct MockStatement<'c> {
    connection: &'c MockConnection,
    statement: ExecutedStatement,
}

impl Statement for MockStatement<'_> {
    fn execute<'s>(&'s mut self) -> Result<Box<dyn RowSource + 's>, DatabaseError> {
        let mut state = self.connection.state.borrow_mut();
        state.executed.push(self.statement.clone());
        match state.script.pop_front() {
            None => Ok(Box::new(MockRows::new(vec![]))),
            Some(Response::Rows(rows)) => Ok(Box::new(MockRows::new(rows))),
            Some(Response::Error(message)) => Err(DatabaseError::new(message)),
        }
    }
}

struct MockRows {
    rows: Vec<Row>,
    position: Option<usize>,
}

impl MockRows {
    fn new(rows: Vec<Row>) -> Self {
        MockRows {
            rows,
            position: None,
        }
    }
}

impl RowSource for MockRows {
    fn advance(&mut self) -> Result<bool, DatabaseError> {
        let next = self.position.map_or(0, |position| position + 1);
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    fn read_column(&self, name: &str) -> Result<serde_json::Value, DatabaseError> {
        let row = self
            .position
            .and_then(|position| self.rows.get(position))
            .ok_or_else(|| DatabaseError::new("no current row"))?;
        row.get(name)
            .cloned()
            .ok_or_else(|| DatabaseError::new(format!("unknown column '{name}'")))
    }
}
