use serde::{Deserialize, Serialize};

/// Remote run registered for the session. Empty until begin-run succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunHandle {
    pub run_id: Option<String>,
}

/// Remote handle for a single test, valid until its finish report is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestHandle {
    pub test_id: Option<String>,
    pub test_name: String,
}

impl TestHandle {
    /// Handle for a test that will not be reported
    pub fn unreported(test_name: &str) -> Self {
        Self {
            test_id: None,
            test_name: test_name.to_string(),
        }
    }
}

/// Body of `POST tests/`
#[derive(Debug, Serialize)]
pub struct BeginTestRequest<'a> {
    pub name: &'a str,
}

/// Body of `POST tests/{test_id}/finish`
#[derive(Debug, Serialize)]
pub struct FinishTestRequest {
    pub status: String,
}

/// Response of `POST runs/`
#[derive(Debug, Deserialize)]
pub struct RunCreated {
    #[serde(default)]
    pub run_id: Option<serde_json::Value>,
}

impl RunCreated {
    pub fn run_id(&self) -> Option<String> {
        self.run_id.as_ref().and_then(id_string)
    }
}

/// Response of `POST tests/`
#[derive(Debug, Deserialize)]
pub struct TestCreated {
    #[serde(default)]
    pub test_id: Option<serde_json::Value>,
}

impl TestCreated {
    pub fn test_id(&self) -> Option<String> {
        self.test_id.as_ref().and_then(id_string)
    }
}

/// Identifiers are strings, but numeric ids are accepted as well
fn id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
