/// Type definitions of a low-level SQL string representation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SQL {
    pub sql: String,
}

impl SQL {
    pub fn new() -> SQL {
        SQL { sql: String::new() }
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append the items separated by `separator`.
    pub fn append_separated<I, S>(&mut self, items: I, separator: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                self.append_syntax(separator);
            }
            self.append_syntax(item.as_ref());
        }
    }
}
