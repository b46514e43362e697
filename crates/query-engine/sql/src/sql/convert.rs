//! Convert a statement to a low-level SQL string.

use super::ast::*;
use super::error::Error;
use super::helpers;
use super::string::SQL;

// Convert to SQL strings

impl Select {
    /// Render the statement, terminated by `;`.
    pub fn to_sql(&self, sql: &mut SQL) -> Result<(), Error> {
        if !self.count && self.select_list.0.is_empty() {
            return Err(Error::IncompleteQuery);
        }

        sql.append_syntax("SELECT ");

        if self.count {
            sql.append_syntax(&format!("COUNT(*) AS {}", helpers::COUNT_COLUMN));
        } else {
            if self.distinct {
                sql.append_syntax("DISTINCT ");
            }
            self.select_list.to_sql(sql);
        }

        // JOINs need something to join to.
        if !self.from.0.is_empty() {
            self.from.to_sql(sql);

            for join in &self.joins {
                join.to_sql(sql);
            }
        }

        if let Some(where_) = &self.where_ {
            where_.to_sql(sql);
        }

        self.order_by.to_sql(sql);

        self.limit.to_sql(sql);

        sql.append_syntax(";");

        Ok(())
    }

    /// Render the statement into a fresh SQL string.
    pub fn query_sql(&self) -> Result<SQL, Error> {
        let mut sql = SQL::new();
        self.to_sql(&mut sql)?;
        Ok(sql)
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_separated(&self.0, ", ");
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(" FROM ");
        sql.append_separated(&self.0, ", ");
    }
}

impl Join {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(" ");
        sql.append_syntax(&self.keyword);
        sql.append_syntax(" ");
        sql.append_syntax(&self.table);
        sql.append_syntax(" ON ");
        sql.append_syntax(&self.on);
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(constraint) = self;
        sql.append_syntax(" WHERE ");
        constraint.to_sql(sql);
    }
}

impl Constraint {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Constraint::Atomic(expression) => {
                sql.append_syntax(" ");
                sql.append_syntax(expression);
                sql.append_syntax(" ");
            }
            Constraint::Combination { operator, children } => {
                if children.is_empty() {
                    sql.append_syntax(" ");
                    sql.append_syntax(operator.identity());
                    sql.append_syntax(" ");
                }
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        sql.append_syntax(" ");
                        sql.append_syntax(operator.keyword());
                        sql.append_syntax(" ");
                    }
                    sql.append_syntax("(");
                    child.to_sql(sql);
                    sql.append_syntax(")");
                }
            }
        }
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        if !self.elements.is_empty() {
            sql.append_syntax(" ORDER BY ");
            for (index, order_by_item) in self.elements.iter().enumerate() {
                if index > 0 {
                    sql.append_syntax(", ");
                }
                order_by_item.to_sql(sql);
            }
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(&self.target);
        self.direction.to_sql(sql);
    }
}

impl OrderByDirection {
    pub fn to_sql(self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => {}
            OrderByDirection::Desc => sql.append_syntax(" DESC"),
        }
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        match (self.offset, self.limit) {
            (Some(offset), Some(limit)) => {
                sql.append_syntax(&format!(" LIMIT {offset}, {limit}"));
            }
            (None, Some(limit)) => {
                sql.append_syntax(&format!(" LIMIT {limit}"));
            }
            (Some(offset), None) => {
                // MySQL has no OFFSET without a LIMIT.
                tracing::warn!(
                    offset,
                    "skipping rows without taking a number of them cannot be expressed; the skip is not rendered"
                );
            }
            (None, None) => {}
        }
    }
}
