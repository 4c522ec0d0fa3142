use serde::Deserialize;
use std::fmt;

/// Lifecycle state of a reporting session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconfigured,
    Configured,
    /// Run registration was disabled or failed; no run will start
    RunSkipped,
    RunStarted,
    TestInProgress,
    RunFinished,
}

impl SessionState {
    /// Whether a remote run is registered and still open
    pub fn is_run_active(&self) -> bool {
        matches!(self, SessionState::RunStarted | SessionState::TestInProgress)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Unconfigured => "unconfigured",
            SessionState::Configured => "configured",
            SessionState::RunSkipped => "run skipped",
            SessionState::RunStarted => "run started",
            SessionState::TestInProgress => "running a test",
            SessionState::RunFinished => "run finished",
        };
        f.write_str(name)
    }
}

/// Test outcome as classified by the test runner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
    Other(String),
}

impl Outcome {
    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
            Outcome::Other(name) => name.as_str(),
        }
    }

    /// Status value sent to the API
    pub fn api_status(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl From<String> for Outcome {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "passed" => Outcome::Passed,
            "failed" => Outcome::Failed,
            "skipped" => Outcome::Skipped,
            _ => Outcome::Other(value),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome counts for a finished session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub reported: usize,
}

impl SessionSummary {
    pub fn record(&mut self, outcome: &Outcome, reported: bool) {
        self.total += 1;
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Other(_) => {}
        }
        if reported {
            self.reported += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_is_uppercase() {
        assert_eq!(Outcome::Passed.api_status(), "PASSED");
        assert_eq!(Outcome::Other("xfailed".into()).api_status(), "XFAILED");
    }

    #[test]
    fn test_outcome_from_string() {
        assert_eq!(Outcome::from("Failed".to_string()), Outcome::Failed);
        assert_eq!(
            Outcome::from("error".to_string()),
            Outcome::Other("error".to_string())
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = SessionSummary::default();
        summary.record(&Outcome::Passed, true);
        summary.record(&Outcome::Failed, false);
        summary.record(&Outcome::Other("error".into()), true);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.reported, 2);
    }

    #[test]
    fn test_run_active_states() {
        assert!(SessionState::RunStarted.is_run_active());
        assert!(SessionState::TestInProgress.is_run_active());
        assert!(!SessionState::Configured.is_run_active());
        assert!(!SessionState::RunSkipped.is_run_active());
        assert!(!SessionState::RunFinished.is_run_active());
    }
}
