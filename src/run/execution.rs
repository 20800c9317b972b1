//! Sequential plan execution with per-step failure isolation

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::run::plan::ExecutionPlan;
use crate::run::report::Reporter;
use crate::run::result::RunResult;

/// Walk the plan strictly sequentially, one step at a time
///
/// Each step is announced to the reporter before it runs. An
/// [`Error::Expectation`] raised by a step body is recorded against that step
/// and execution continues with the next step. Any other error aborts the
/// remaining plan and propagates to the caller.
pub fn execute<C: Connection>(
    plan: &ExecutionPlan,
    connection: &mut C,
    reporter: &mut dyn Reporter,
) -> Result<RunResult> {
    let mut result = RunResult::new();

    for step in plan.steps() {
        reporter.on_step(step);
        result.record_step();

        match step.run(connection) {
            Ok(()) => {}
            Err(Error::Expectation { message }) => {
                let record = result.record_failure(message, step.description()).clone();
                reporter.on_failure(&record);
            }
            Err(fatal) => return Err(fatal),
        }
    }

    Ok(result)
}
