pub mod events;
pub mod replay;
pub mod state;

use crate::error::ReportError;

pub use events::*;
pub use state::*;

/// A test the runner can execute
pub trait TestCase {
    fn name(&self) -> &str;

    /// Execute the test body and classify the result
    fn run(&mut self) -> Outcome;
}

/// Run one test inside its reporting unit.
///
/// The test id is acquired before the body runs and the result is
/// submitted after it, so reporting latency never overlaps the test itself.
/// Returns the outcome and whether the API accepted it.
pub fn run_test<H, F>(hooks: &mut H, test_name: &str, body: F) -> (Outcome, bool)
where
    H: SessionHooks + ?Sized,
    F: FnOnce() -> Outcome,
{
    let handle = hooks.on_test_start(test_name);
    let outcome = body();
    let reported = hooks.on_test_finish(handle, &outcome);
    (outcome, reported)
}

/// Run a collected session against already configured hooks.
///
/// A failed run registration aborts before any test executes. A failed
/// run finish is returned after every test has run.
pub fn run_session<H, I>(hooks: &mut H, tests: I) -> Result<SessionSummary, ReportError>
where
    H: SessionHooks + ?Sized,
    I: IntoIterator,
    I::Item: TestCase,
{
    hooks.on_run_start()?;

    let mut summary = SessionSummary::default();
    for mut test in tests {
        let name = test.name().to_string();
        let (outcome, reported) = run_test(hooks, &name, || test.run());
        log::debug!("Test {:?} finished: {}", name, outcome);
        summary.record(&outcome, reported);
    }

    hooks.on_run_finish()?;
    Ok(summary)
}
