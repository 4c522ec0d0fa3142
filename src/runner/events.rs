use super::state::Outcome;
use crate::error::ReportError;
use crate::report::types::TestHandle;

/// Lifecycle callbacks a test runner invokes while it executes a session.
///
/// The runner calls them strictly in order: `on_configure`, then
/// `on_run_start` once collection is done, then `on_test_start` and
/// `on_test_finish` around every test body, and `on_run_finish` at
/// teardown. Only the run-level callbacks can fail; per-test reporting
/// problems never affect the tests themselves.
pub trait SessionHooks {
    /// Returns the header lines to print before the session
    fn on_configure(&mut self) -> Vec<String>;

    fn on_run_start(&mut self) -> Result<(), ReportError>;

    /// Called before the test body runs
    fn on_test_start(&mut self, test_name: &str) -> TestHandle;

    /// Called once the test result is known. Returns whether the result was
    /// accepted by the API.
    fn on_test_finish(&mut self, handle: TestHandle, outcome: &Outcome) -> bool;

    fn on_run_finish(&mut self) -> Result<(), ReportError>;
}
