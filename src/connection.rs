//! The data-connection capability that step actions run against

use crate::error::Result;
use std::fmt;

/// A single column value in a query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 64-bit integer
    Integer(i64),
    /// Text value
    Text(String),
    /// SQL NULL
    Null,
}

/// One result row
pub type Row = Vec<Value>;

/// A full query result, rows in the order the connection returned them
pub type Rows = Vec<Row>;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Render rows in the script's literal syntax, for expectation messages
pub fn format_rows(rows: &[Row]) -> String {
    let rendered: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            format!("[{}]", values.join(", "))
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}

/// The externally supplied connection that scripts execute queries against
///
/// Any storage engine can satisfy this: a real SQL database driver, an
/// in-memory store, or a recording mock in tests. Implementations should
/// surface their own failures as [`crate::Error::Connection`] so the runner
/// can tell them apart from assertion failures.
pub trait Connection {
    /// Execute a query, returning the result rows (empty for statements)
    fn execute(&mut self, query: &str) -> Result<Rows>;

    /// The row id generated by the most recent insert
    fn last_insert_id(&mut self) -> Result<i64>;
}

impl Connection for Box<dyn Connection> {
    fn execute(&mut self, query: &str) -> Result<Rows> {
        (**self).execute(query)
    }

    fn last_insert_id(&mut self) -> Result<i64> {
        (**self).last_insert_id()
    }
}
