//! Reporting sinks for step progress and the final summary

use crate::run::result::{FailureRecord, RunResult};
use crate::run::step::Step;
use std::io::{self, Write};

/// Receives progress callbacks from the executor
///
/// A reporter is a pure sink: it must not affect ordering or control flow.
pub trait Reporter {
    /// A step is about to run
    fn on_step(&mut self, step: &Step);

    /// An assertion failure was recorded for the current step
    fn on_failure(&mut self, failure: &FailureRecord);

    /// The run finished; render the final summary
    fn on_results(&mut self, result: &RunResult);
}

/// Reporter that writes plain text lines to any output sink
pub struct WriteReporter<W: Write> {
    out: W,
}

impl<W: Write> WriteReporter<W> {
    /// Wrap an output sink
    pub fn new(out: W) -> Self {
        WriteReporter { out }
    }
}

impl WriteReporter<io::Stdout> {
    /// A reporter writing to standard output
    pub fn stdout() -> Self {
        WriteReporter { out: io::stdout() }
    }
}

impl<W: Write> Reporter for WriteReporter<W> {
    fn on_step(&mut self, step: &Step) {
        let _ = writeln!(self.out, "{}", step.description());
    }

    fn on_failure(&mut self, failure: &FailureRecord) {
        let _ = writeln!(self.out, "{}", failure.summary());
    }

    fn on_results(&mut self, result: &RunResult) {
        let _ = writeln!(self.out, "--- Done -- ");
        let _ = writeln!(self.out, "Summary:");
        let _ = writeln!(self.out, "{}", result.summary());
    }
}

/// The default reporter: standard output, failure lines in red on a TTY when
/// the `colors` feature is enabled
#[derive(Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Create a console reporter
    pub fn new() -> Self {
        ConsoleReporter
    }
}

impl Reporter for ConsoleReporter {
    fn on_step(&mut self, step: &Step) {
        println!("{}", step.description());
    }

    #[cfg(not(feature = "colors"))]
    fn on_failure(&mut self, failure: &FailureRecord) {
        println!("{}", failure.summary());
    }

    #[cfg(feature = "colors")]
    fn on_failure(&mut self, failure: &FailureRecord) {
        use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(&mut stdout, "{}", failure.summary());
        let _ = stdout.reset();
    }

    fn on_results(&mut self, result: &RunResult) {
        println!("--- Done -- ");
        println!("Summary:");
        println!("{}", result.summary());
    }
}
