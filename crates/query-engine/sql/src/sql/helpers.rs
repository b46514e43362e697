//! Helpers for building statements in certain shapes and patterns.

use query_engine_metadata::metadata::EntityInfo;

use super::ast::*;

/// The column a count statement returns its result in.
pub const COUNT_COLUMN: &str = "numrows";

// Empty clauses //

/// An empty select list.
pub fn empty_select_list() -> SelectList {
    SelectList(vec![])
}

/// An empty `FROM` clause.
pub fn empty_from() -> From {
    From(vec![])
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// An empty `LIMIT` clause.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

// SELECTs //

/// A statement with nothing in it yet. Rows are selected DISTINCT unless told otherwise.
pub fn empty_select() -> Select {
    Select {
        distinct: true,
        select_list: empty_select_list(),
        count: false,
        from: empty_from(),
        joins: vec![],
        where_: None,
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Build a simple select with a select list and a from clause and the rest empty.
pub fn simple_select(select_list: Vec<String>, from: Vec<String>) -> Select {
    Select {
        select_list: SelectList(select_list),
        from: From(from),
        ..empty_select()
    }
}

/// `table.column AS alias` for every column-mapped property of an entity, in
/// declaration order.
pub fn entity_select_list(table: &str, entity: &EntityInfo) -> Vec<String> {
    entity
        .columns()
        .map(|(_, mapping)| mapping.select_expression(table))
        .collect()
}
