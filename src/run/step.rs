//! Step model: the executable units of a test script

use crate::connection::{format_rows, Connection};
use crate::error::{Error, Result};
use crate::parser::Op;

/// What kind of step this is, and the fields its description derives from
#[derive(Debug, Clone, PartialEq)]
enum StepKind {
    Before { description: String },
    Stand { test_case: String, key: i64 },
}

/// A single executable unit: a before-action, or a stand owned by a test case
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    kind: StepKind,
    ops: Vec<Op>,
}

impl Step {
    /// A before-action step
    pub fn before(description: impl Into<String>, ops: Vec<Op>) -> Self {
        Step {
            kind: StepKind::Before {
                description: description.into(),
            },
            ops,
        }
    }

    /// A stand step belonging to the named test case
    pub fn stand(test_case: impl Into<String>, key: i64, ops: Vec<Op>) -> Self {
        Step {
            kind: StepKind::Stand {
                test_case: test_case.into(),
                key,
            },
            ops,
        }
    }

    /// Human-readable description used in progress lines and failure records
    pub fn description(&self) -> String {
        match &self.kind {
            StepKind::Before { description } => format!("before: {}", description),
            StepKind::Stand { test_case, key } => {
                format!("testcase {} - stand {}", test_case, key)
            }
        }
    }

    /// Run the step's operations against the connection, in order
    ///
    /// Expectation mismatches surface as [`Error::Expectation`]; connection
    /// errors propagate untouched.
    pub fn run<C: Connection>(&self, connection: &mut C) -> Result<()> {
        for op in &self.ops {
            apply_op(op, connection)?;
        }
        Ok(())
    }
}

/// Apply one operation against the connection
fn apply_op<C: Connection>(op: &Op, connection: &mut C) -> Result<()> {
    match op {
        Op::Execute { query } => {
            connection.execute(query)?;
            Ok(())
        }
        Op::ExpectQuery { query, expected } => {
            let rows = connection.execute(query)?;
            if &rows == expected {
                Ok(())
            } else {
                Err(Error::expectation(format!(
                    "expected {}, got {}",
                    format_rows(expected),
                    format_rows(&rows)
                )))
            }
        }
        Op::ExpectEq { actual, expected } => {
            if actual == expected {
                Ok(())
            } else {
                Err(Error::expectation(format!(
                    "expected {}, got {}",
                    expected, actual
                )))
            }
        }
        Op::ExpectLastInsertId { expected } => {
            let id = connection.last_insert_id()?;
            if id == *expected {
                Ok(())
            } else {
                Err(Error::expectation(format!(
                    "expected last insert id {}, got {}",
                    expected, id
                )))
            }
        }
    }
}
