pub mod api;
pub mod reporter;
pub mod types;

pub use api::{ApiResponse, HttpTransport, ReportTransport};
pub use reporter::{header_line, SessionReporter};
pub use types::{RunHandle, TestHandle};
