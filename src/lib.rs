//! # sqlscript-rs
//!
//! A Rust crate for acceptance-testing SQL databases using declarative
//! test-script files.
//!
//! A script declares named test cases, each containing numbered "stand"
//! steps, plus optional `before` setup steps that run ahead of all test
//! cases. The engine collects the declarations, imposes a deterministic
//! execution order (befores in declaration order, then stands by ascending
//! key), runs each step against an externally supplied connection, isolates
//! per-step assertion failures without aborting the run, and renders a
//! summary of every failure.

pub mod connection;
pub mod error;
pub mod parser;
pub mod run;

pub use connection::{Connection, Row, Rows, Value};
pub use error::{Error, Result};
pub use parser::{Op, Script};
pub use run::{
    ConsoleReporter, ExecutionPlan, FailureRecord, Reporter, RunResult, Runner, Step,
    WriteReporter,
};

// Re-export for advanced users who need direct access to plan execution
pub use run::execution::execute;

/// Factory producing a fresh connection for each script
pub type ConnectFn = Box<dyn Fn() -> Result<Box<dyn Connection>>>;

// Internal function used by the Builder - not part of public API
fn run_all(connect: &ConnectFn, test_data_glob: &str) -> Result<()> {
    use walkdir::WalkDir;

    // Simple glob pattern matching - just handle basic patterns like "testdata/*.txt"
    let (base_dir, pattern) = if let Some(slash_pos) = test_data_glob.rfind('/') {
        let base_dir = &test_data_glob[..slash_pos];
        let pattern = &test_data_glob[slash_pos + 1..];
        (base_dir, pattern)
    } else {
        (".", test_data_glob)
    };

    // Convert glob pattern to a simple matcher
    let pattern_regex = pattern.replace("*", ".*");
    let regex = regex::Regex::new(&format!("^{}$", pattern_regex))?;

    let mut script_files = Vec::new();

    // Walk the directory and collect matching files
    for entry in WalkDir::new(base_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            if let Some(file_name) = entry.file_name().to_str() {
                if regex.is_match(file_name) {
                    script_files.push(entry.path().to_path_buf());
                }
            }
        }
    }

    // Sort script files for consistent execution order
    script_files.sort();

    if script_files.is_empty() {
        return Err(Error::Generic(format!(
            "No test scripts found matching pattern: {}",
            test_data_glob
        )));
    }

    // Run each script against a fresh connection
    for script_file in script_files {
        let connection = connect()?;
        let mut runner = Runner::new(connection);
        let result = runner.run_file(&script_file).map_err(|e| {
            Error::Generic(format!("Script '{}' failed: {}", script_file.display(), e))
        })?;
        if result.error_count() > 0 {
            return Err(Error::Generic(format!(
                "Script '{}' had {} failures:\n{}",
                script_file.display(),
                result.error_count(),
                result.summary()
            )));
        }
    }

    Ok(())
}

/// Builder for configuring and running a directory of test scripts
///
/// This provides a fluent interface for pointing the engine at a directory
/// of scripts and the connection they should run against.
///
/// # Examples
///
/// ```no_run
/// use sqlscript_rs::{sqlscript, Connection, Result, Rows};
///
/// struct MyConnection;
///
/// impl Connection for MyConnection {
///     fn execute(&mut self, _query: &str) -> Result<Rows> {
///         // Hand the query to your database driver here
///         Ok(vec![])
///     }
///
///     fn last_insert_id(&mut self) -> Result<i64> {
///         Ok(0)
///     }
/// }
///
/// sqlscript::run("testdata")
///     .connect(|| Ok(MyConnection))
///     .execute()
///     .unwrap();
/// ```
pub struct Builder {
    dir: String,
    connect: Option<ConnectFn>,
}

impl Builder {
    /// Create a new builder for the given script directory
    fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            connect: None,
        }
    }

    /// Set the connection factory, invoked once per script
    ///
    /// Each script runs against a fresh connection so state cannot leak
    /// between scripts.
    pub fn connect<F, C>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<C> + 'static,
        C: Connection + 'static,
    {
        self.connect = Some(Box::new(move || {
            factory().map(|c| Box::new(c) as Box<dyn Connection>)
        }));
        self
    }

    /// Execute all test scripts in the configured directory
    ///
    /// This will discover all `.txt` files in the directory and run each as a
    /// test script against its own connection.
    ///
    /// # Returns
    /// `Ok(())` if every script runs without failures, or the first error
    /// encountered. A script whose summary lists assertion failures is an
    /// error here; the failure summary is embedded in the message.
    pub fn execute(self) -> Result<()> {
        let connect = self.connect.ok_or_else(|| {
            Error::Generic("No connection factory configured; call connect() first".to_string())
        })?;
        let pattern = format!("{}/*.txt", self.dir);
        run_all(&connect, &pattern)
    }
}

/// Create a new sqlscript builder for the given directory
///
/// This is the main entry point for running a directory of test scripts.
///
/// # Examples
///
/// ```no_run
/// use sqlscript_rs::{sqlscript, Connection, Result, Rows};
/// # struct MyConnection;
/// # impl Connection for MyConnection {
/// #     fn execute(&mut self, _query: &str) -> Result<Rows> { Ok(vec![]) }
/// #     fn last_insert_id(&mut self) -> Result<i64> { Ok(0) }
/// # }
///
/// // Run all scripts in the testdata directory
/// sqlscript::run("testdata")
///     .connect(|| Ok(MyConnection))
///     .execute()
///     .unwrap();
/// ```
pub mod sqlscript {
    use super::*;

    /// Create a new sqlscript builder for the given directory
    pub fn run(dir: impl Into<String>) -> Builder {
        Builder::new(dir)
    }
}
