pub mod error;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use error::{ConfigError, ReportError};
pub use report::{header_line, SessionReporter};
pub use runner::{run_session, run_test, Outcome, SessionHooks, TestCase};
pub use utils::config::{ReportApiArgs, ReportConfig};
