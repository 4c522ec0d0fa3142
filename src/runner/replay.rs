//! Replay recorded test results through the reporting lifecycle.

use super::{Outcome, TestCase};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Results recorded by an earlier test run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordedResults {
    #[serde(default)]
    pub tests: Vec<RecordedTest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordedTest {
    pub name: String,
    pub outcome: Outcome,
}

impl TestCase for RecordedTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self) -> Outcome {
        self.outcome.clone()
    }
}

impl RecordedResults {
    /// Load results from a `.json` file, or YAML for any other extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file: {}", path.display()))?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON results: {}", path.display()))
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML results: {}", path.display()))
        }
    }
}
