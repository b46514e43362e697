//! Handle the translation of operator arguments.

use query_engine_models::{Argument, Literal};

use crate::translation::error::Error;

/// Convert the argument of `Skip`, `Take` or `ElementAt` into a row count.
/// Only non-negative integer literals are accepted.
pub fn translate_count_argument(operator: &'static str, argument: &Argument) -> Result<u32, Error> {
    let unsupported = |argument: String| Error::UnsupportedOperatorArgument { operator, argument };

    match argument {
        Argument::Literal {
            value: Literal::Integer(count),
        } => u32::try_from(*count).map_err(|_| unsupported(count.to_string())),
        Argument::Literal {
            value: Literal::Null,
        } => Err(unsupported("null".to_string())),
        Argument::Literal {
            value: Literal::Boolean(b),
        } => Err(unsupported(b.to_string())),
        Argument::Literal {
            value: Literal::String(s),
        } => Err(unsupported(format!("'{s}'"))),
        Argument::Variable { name } => Err(unsupported(format!("the variable '{name}'"))),
    }
}
