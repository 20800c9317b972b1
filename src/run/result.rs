//! Result collection: step counts, failure records and the run summary

/// An assertion failure paired with the step that was executing
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    step_description: String,
    message: String,
}

impl FailureRecord {
    /// Description of the step the failure occurred in
    pub fn step_description(&self) -> &str {
        &self.step_description
    }

    /// The underlying assertion-failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// One summary line, e.g. `In testcase name - stand 0: expected 4, got 2`
    pub fn summary(&self) -> String {
        format!("In {}: {}", self.step_description, self.message)
    }
}

/// Accumulated outcome of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    steps_run: usize,
    failures: Vec<FailureRecord>,
}

impl RunResult {
    /// An empty result, before any step has run
    pub fn new() -> Self {
        RunResult::default()
    }

    /// Count one executed step
    pub fn record_step(&mut self) {
        self.steps_run += 1;
    }

    /// Record an assertion failure against the step that caused it
    pub fn record_failure(
        &mut self,
        message: impl Into<String>,
        step_description: impl Into<String>,
    ) -> &FailureRecord {
        self.failures.push(FailureRecord {
            step_description: step_description.into(),
            message: message.into(),
        });
        // Just pushed, so the list is non-empty
        &self.failures[self.failures.len() - 1]
    }

    /// Number of steps executed
    pub fn step_count(&self) -> usize {
        self.steps_run
    }

    /// Number of failures recorded
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// The failure records, in the order the failures occurred
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// Render the summary: one line per failure, then the count line
    ///
    /// The trailing label counts executed steps, not distinct test cases.
    pub fn summary(&self) -> String {
        let mut lines: Vec<String> = self.failures.iter().map(|f| f.summary()).collect();
        lines.push(format!(
            "{} testcases - {} failures",
            self.steps_run,
            self.failures.len()
        ));
        lines.join("\n")
    }
}
