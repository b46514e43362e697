//! Combining row constraints.

use std::str::FromStr;

use super::ast::{BooleanOperator, Constraint};
use super::error::Error;

impl Constraint {
    pub fn atomic(expression: impl Into<String>) -> Self {
        Constraint::Atomic(expression.into())
    }

    /// A combination with no children, which renders as the operator's identity element.
    pub fn empty(operator: BooleanOperator) -> Self {
        Constraint::Combination {
            operator,
            children: vec![],
        }
    }

    /// Combine this constraint with another one.
    ///
    /// A combination under the same operator absorbs the new constraint, so adding
    /// constraints one at a time builds a single flat combination rather than a chain
    /// of nested ones.
    #[must_use]
    pub fn combine(self, other: Constraint, operator: BooleanOperator) -> Constraint {
        match self {
            Constraint::Combination {
                operator: current,
                mut children,
            } if current == operator => {
                children.push(other);
                Constraint::Combination { operator, children }
            }
            this => Constraint::Combination {
                operator,
                children: vec![this, other],
            },
        }
    }
}

impl BooleanOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }

    /// The expression an empty combination stands for.
    pub fn identity(self) -> &'static str {
        match self {
            BooleanOperator::And => "1",
            BooleanOperator::Or => "0",
        }
    }
}

impl FromStr for BooleanOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(BooleanOperator::And),
            "OR" => Ok(BooleanOperator::Or),
            _ => Err(Error::InvalidArgument(format!(
                "combine operator must be AND or OR, got '{s}'"
            ))),
        }
    }
}
