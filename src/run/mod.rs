//! Script execution module

pub mod execution;
pub mod plan;
pub mod report;
pub mod result;
pub mod step;

// Re-export public types
pub use plan::ExecutionPlan;
pub use report::{ConsoleReporter, Reporter, WriteReporter};
pub use result::{FailureRecord, RunResult};
pub use step::Step;

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::parser;
use std::fs;
use std::io;
use std::path::Path;

/// Runs test scripts against an owned connection
///
/// One `Runner` holds the connection and reporter for the duration of a run;
/// nothing is retained across runs beyond the connection's own state.
pub struct Runner<C: Connection> {
    connection: C,
    reporter: Box<dyn Reporter>,
}

impl<C: Connection> Runner<C> {
    /// Create a runner reporting to standard output
    pub fn new(connection: C) -> Self {
        Runner {
            connection,
            reporter: Box::new(ConsoleReporter::new()),
        }
    }

    /// Replace the reporter
    pub fn reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Load, order and execute a script, then report the final summary
    pub fn run(&mut self, script_text: &str) -> Result<RunResult> {
        let script = parser::parse(script_text)?;
        let plan = ExecutionPlan::build(script);
        let result = execution::execute(&plan, &mut self.connection, self.reporter.as_mut())?;
        self.reporter.on_results(&result);
        Ok(result)
    }

    /// Read a script file from disk and run it
    ///
    /// A missing file surfaces as [`Error::ScriptNotFound`], distinct from
    /// other IO errors.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<RunResult> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::ScriptNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        self.run(&content)
    }

    /// Give the connection back to the caller
    pub fn into_connection(self) -> C {
        self.connection
    }
}
