//! The database client the engine executes statements with.
//!
//! A connection is opened for a single statement and released when it is dropped, so
//! every exit path of an execution gives it back. Statements and row sources borrow
//! from the connection they were created on and cannot outlive it.

use std::collections::BTreeMap;

/// Named parameters passed along with a statement.
pub type Params = BTreeMap<String, serde_json::Value>;

/// An error reported by the database client. It is passed to the caller unchanged.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct DatabaseError(Box<dyn std::error::Error + Send + Sync>);

impl DatabaseError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        DatabaseError(error.into())
    }

    /// The error reported by the client.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

/// Opens connections to the database.
pub trait ConnectionFactory {
    fn open(&self) -> Result<Box<dyn Connection>, DatabaseError>;
}

/// An open connection. Dropping it releases it.
pub trait Connection {
    fn create_statement<'c>(
        &'c mut self,
        sql: &str,
        params: &Params,
    ) -> Result<Box<dyn Statement + 'c>, DatabaseError>;
}

/// A statement ready to be executed.
pub trait Statement {
    fn execute<'s>(&'s mut self) -> Result<Box<dyn RowSource + 's>, DatabaseError>;
}

/// A cursor over the rows a statement returned.
pub trait RowSource {
    /// Move to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool, DatabaseError>;

    /// Read a column of the current row. SQL NULL is `serde_json::Value::Null`.
    fn read_column(&self, name: &str) -> Result<serde_json::Value, DatabaseError>;
}
