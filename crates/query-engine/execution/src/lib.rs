//! Query execution against a database reached through a connection factory, and the
//! materialization of the rows it returns.

pub mod connection;
pub mod error;
pub mod execution;
pub mod materializer;
pub mod result;
