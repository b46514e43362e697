//! Type definitions of a SQL statement representation.
//!
//! Expressions are kept as opaque SQL text supplied by the caller or derived from the
//! field mappings; only the shape of the statement is modelled.

use std::rc::Rc;

/// A SELECT statement under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,
    pub select_list: SelectList,
    /// Select `COUNT(*) AS numrows` instead of the select list.
    pub count: bool,
    pub from: From,
    pub joins: Vec<Join>,
    pub where_: Option<Where>,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// A select list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectList(pub Vec<String>);

/// A FROM clause
#[derive(Debug, Clone, PartialEq, Default)]
pub struct From(pub Vec<String>);

/// A JOIN clause, e.g. `LEFT JOIN suppliers ON products.main_supplier = suppliers.id`
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub keyword: String,
    pub table: String,
    pub on: String,
}

/// A WHERE clause. The constraint is shared between clones of a statement and
/// copied before it is modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Rc<Constraint>);

/// A row constraint, such as may appear in a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// An expression we do not look into.
    Atomic(String),
    /// Constraints combined with a single boolean operator.
    Combination {
        operator: BooleanOperator,
        children: Vec<Constraint>,
    },
}

/// The operators constraints are combined with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: String,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// The LIMIT clause. `offset` is the number of rows skipped, `limit` the number taken.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Limit {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
