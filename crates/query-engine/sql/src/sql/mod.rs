//! The SQL statement model, its rendering, and the operations built around it.

pub mod ast;
pub mod constraint;
pub mod convert;
pub mod error;
pub mod execution_plan;
pub mod helpers;
pub mod statement;
pub mod string;
