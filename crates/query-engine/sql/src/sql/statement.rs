//! Building up a statement one clause at a time.
//!
//! The translator works on its own clone of a baseline statement, so every mutation
//! here leaves other clones untouched. The WHERE constraint is the only part shared
//! between clones, and it is copied before it is extended.

use std::rc::Rc;

use query_engine_metadata::metadata::EntityInfo;

use super::ast::*;
use super::error::Error;
use super::helpers;

impl Default for Select {
    fn default() -> Self {
        helpers::empty_select()
    }
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_select(&mut self, expression: impl Into<String>) -> &mut Self {
        self.select_list.0.push(expression.into());
        self
    }

    /// Select every column-mapped property of an entity from `table`.
    pub fn add_select_for_entity(&mut self, table: &str, entity: &EntityInfo) -> &mut Self {
        self.select_list
            .0
            .extend(helpers::entity_select_list(table, entity));
        self
    }

    pub fn add_from(&mut self, expression: impl Into<String>) -> &mut Self {
        self.from.0.push(expression.into());
        self
    }

    /// Join `table` to whatever is already in the FROM clause.
    pub fn add_join(
        &mut self,
        keyword: impl Into<String>,
        table: impl Into<String>,
        on: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        if self.from.0.is_empty() {
            return Err(Error::InvalidArgument(
                "a join needs a FROM clause to join to".to_string(),
            ));
        }
        self.joins.push(Join {
            keyword: keyword.into(),
            table: table.into(),
            on: on.into(),
        });
        Ok(self)
    }

    /// Add a constraint to the WHERE clause, combining it with the existing
    /// constraint under `operator`.
    pub fn add_where(
        &mut self,
        constraint: impl Into<String>,
        operator: BooleanOperator,
    ) -> Result<&mut Self, Error> {
        let constraint = constraint.into();
        if constraint.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "a where clause cannot be empty".to_string(),
            ));
        }
        let new = Constraint::Atomic(constraint);

        self.where_ = Some(match self.where_.take() {
            None => Where(Rc::new(new)),
            Some(Where(current)) => {
                // Other clones may still hold the current constraint.
                let current = Rc::try_unwrap(current).unwrap_or_else(|shared| (*shared).clone());
                Where(Rc::new(current.combine(new, operator)))
            }
        });
        Ok(self)
    }

    pub fn add_order_by(
        &mut self,
        target: impl Into<String>,
        direction: OrderByDirection,
    ) -> &mut Self {
        self.order_by.elements.push(OrderByElement {
            target: target.into(),
            direction,
        });
        self
    }

    /// Render `COUNT(*) AS numrows` in place of the select list.
    pub fn set_count_mode(&mut self) -> &mut Self {
        self.count = true;
        self
    }

    pub fn set_distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    pub fn set_skip(&mut self, skip: u32) -> &mut Self {
        self.limit.offset = Some(skip);
        self
    }

    pub fn set_take(&mut self, take: u32) -> &mut Self {
        self.limit.limit = Some(take);
        self
    }
}
