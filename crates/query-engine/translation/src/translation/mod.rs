//! Translate an operator tree into the chain of operations that executes it.

pub mod error;
pub mod helpers;
pub mod query;
