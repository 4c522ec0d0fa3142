//! Session reporter
//!
//! Drives the report API through one test session:
//! begin run, then begin/finish for each test, then finish run.

use super::api::{ApiResponse, HttpTransport, ReportTransport};
use super::types::{
    BeginTestRequest, FinishTestRequest, RunCreated, RunHandle, TestCreated, TestHandle,
};
use crate::error::ReportError;
use crate::runner::{Outcome, SessionHooks, SessionState};
use crate::utils::config::{ReportApiArgs, ReportConfig};

const RUNS_PATH: &str = "runs/";
const TESTS_PATH: &str = "tests/";

const CALL_BEGIN_RUN: &str = "POST runs/";
const CALL_FINISH_RUN: &str = "POST runs/{run_id}/finish/";
const CALL_BEGIN_TEST: &str = "POST tests/";
const CALL_FINISH_TEST: &str = "POST tests/{test_id}/finish";

/// Header line describing where results go
pub fn header_line(config: &ReportConfig) -> String {
    if config.is_disabled() {
        return "Tests will NOT be reported to API".to_string();
    }

    let token = match config.auth_token() {
        Some(token) => format!("*{}", token.chars().take(3).collect::<String>()),
        None => "null".to_string(),
    };
    format!(
        "Tests will be reported to '{}' (token: {})",
        config.api_url(),
        token
    )
}

/// Reports one test session to the API
pub struct SessionReporter<T: ReportTransport> {
    config: ReportConfig,
    transport: T,
    run: RunHandle,
    state: SessionState,
}

impl SessionReporter<HttpTransport> {
    /// Resolve configuration from flags, environment and config file, and
    /// build an HTTP reporter for it.
    pub fn from_args(args: &ReportApiArgs) -> Result<Self, ReportError> {
        let config = ReportConfig::from_process_env(args)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: ReportTransport> SessionReporter<T> {
    pub fn new(config: ReportConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            run: RunHandle::default(),
            state: SessionState::Unconfigured,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn run(&self) -> &RunHandle {
        &self.run
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mark the session configured and return its header line
    pub fn configure(&mut self) -> String {
        if self.state == SessionState::Unconfigured {
            self.state = SessionState::Configured;
        }
        header_line(&self.config)
    }

    /// Register the run with the API.
    ///
    /// Does nothing when reporting is disabled. Any failure is fatal for the
    /// session and leaves the run unregistered. Registration is attempted at
    /// most once per session.
    pub fn begin_run(&mut self) -> Result<(), ReportError> {
        if self.state != SessionState::Configured {
            return Err(ReportError::OutOfOrder {
                operation: "begin run",
                state: self.state,
            });
        }
        self.state = SessionState::RunSkipped;
        if self.config.is_disabled() {
            log::debug!("Report API disabled, not registering run");
            return Ok(());
        }

        let response = self.transport.post(RUNS_PATH, None)?;
        ensure_success(CALL_BEGIN_RUN, &response)?;

        let created: RunCreated =
            serde_json::from_str(&response.body).map_err(|source| ReportError::Json {
                call: CALL_BEGIN_RUN,
                source,
            })?;
        let run_id = created.run_id().ok_or_else(|| ReportError::MissingField {
            call: CALL_BEGIN_RUN,
            field: "run_id",
            body: response.body.clone(),
        })?;

        log::info!("Registered test run {} with the report API", run_id);
        self.run.run_id = Some(run_id);
        self.state = SessionState::RunStarted;
        Ok(())
    }

    /// Register a test about to run.
    ///
    /// Failures are logged; the returned handle then has no id and the
    /// test's result will not be reported.
    pub fn begin_test(&mut self, test_name: &str) -> TestHandle {
        if !self.state.is_run_active() {
            return TestHandle::unreported(test_name);
        }
        if self.state == SessionState::TestInProgress {
            log::warn!("Test {:?} started before the previous test finished", test_name);
        }
        self.state = SessionState::TestInProgress;

        let test_id = match self.request_test_id(test_name) {
            Ok(test_id) => test_id,
            Err(err) => {
                log::error!("Failed to register test {:?}: {}", test_name, err);
                None
            }
        };

        TestHandle {
            test_id,
            test_name: test_name.to_string(),
        }
    }

    fn request_test_id(&self, test_name: &str) -> Result<Option<String>, ReportError> {
        let body = serde_json::to_value(BeginTestRequest { name: test_name }).map_err(
            |source| ReportError::Json {
                call: CALL_BEGIN_TEST,
                source,
            },
        )?;
        let response = self.transport.post(TESTS_PATH, Some(&body))?;

        if response.status != 201 {
            log::error!(
                "Invalid response from the report API ({}): {}",
                response.status,
                response.body
            );
            return Ok(None);
        }

        let test_id = serde_json::from_str::<TestCreated>(&response.body)
            .ok()
            .and_then(|created| created.test_id());
        if test_id.is_none() {
            log::error!(
                "No test id provided in the report API response for test {:?}: {}",
                test_name,
                response.body
            );
        }
        Ok(test_id)
    }

    /// Submit a test result. Returns true when the API accepted it.
    pub fn finish_test(&mut self, handle: TestHandle, outcome: &Outcome) -> bool {
        if self.state == SessionState::TestInProgress {
            self.state = SessionState::RunStarted;
        }
        let Some(test_id) = handle.test_id else {
            return false;
        };
        if !self.state.is_run_active() {
            return false;
        }

        let path = format!("{}{}/finish", TESTS_PATH, test_id);
        let result = serde_json::to_value(FinishTestRequest {
            status: outcome.api_status(),
        })
        .map_err(|source| ReportError::Json {
            call: CALL_FINISH_TEST,
            source,
        })
        .and_then(|body| self.transport.post(&path, Some(&body)));

        match result {
            Ok(response) if response.status == 204 => true,
            Ok(response) => {
                log::error!(
                    "The test {:?} with test_id {:?} was not properly finished: {}",
                    handle.test_name,
                    test_id,
                    response.body
                );
                false
            }
            Err(err) => {
                log::error!(
                    "The test {:?} with test_id {:?} was not properly finished: {}",
                    handle.test_name,
                    test_id,
                    err
                );
                false
            }
        }
    }

    /// Close the run on the API. Failures are fatal for the session.
    pub fn finish_run(&mut self) -> Result<(), ReportError> {
        if matches!(
            self.state,
            SessionState::Unconfigured | SessionState::RunFinished
        ) {
            return Err(ReportError::OutOfOrder {
                operation: "finish run",
                state: self.state,
            });
        }
        self.state = SessionState::RunFinished;

        let Some(run_id) = self.run.run_id.as_deref() else {
            return Ok(());
        };

        let path = format!("{}{}/finish/", RUNS_PATH, run_id);
        let response = self.transport.post(&path, None)?;
        ensure_success(CALL_FINISH_RUN, &response)?;

        log::info!("Finished test run {} on the report API", run_id);
        Ok(())
    }
}

impl<T: ReportTransport> SessionHooks for SessionReporter<T> {
    fn on_configure(&mut self) -> Vec<String> {
        vec![self.configure()]
    }

    fn on_run_start(&mut self) -> Result<(), ReportError> {
        self.begin_run()
    }

    fn on_test_start(&mut self, test_name: &str) -> TestHandle {
        self.begin_test(test_name)
    }

    fn on_test_finish(&mut self, handle: TestHandle, outcome: &Outcome) -> bool {
        self.finish_test(handle, outcome)
    }

    fn on_run_finish(&mut self) -> Result<(), ReportError> {
        self.finish_run()
    }
}

fn ensure_success(call: &'static str, response: &ApiResponse) -> Result<(), ReportError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ReportError::Status {
            call,
            status: response.status,
            body: response.body.clone(),
        })
    }
}
