use lumi_report_api::report::{HttpTransport, SessionReporter};
use lumi_report_api::runner::replay::RecordedTest;
use lumi_report_api::{run_session, Outcome, ReportConfig, ReportError};
use mockito::Matcher;
use serde_json::json;
use std::net::TcpListener;

fn reporter(url: &str, token: Option<&str>, disabled: bool) -> SessionReporter<HttpTransport> {
    let config = ReportConfig::new(url, token.map(String::from), disabled);
    let transport = HttpTransport::new(&config).unwrap();
    let mut reporter = SessionReporter::new(config, transport);
    reporter.configure();
    reporter
}

fn recorded(name: &str, outcome: Outcome) -> RecordedTest {
    RecordedTest {
        name: name.to_string(),
        outcome,
    }
}

#[test]
fn test_reports_full_session() {
    let mut server = mockito::Server::new();

    let begin_run = server
        .mock("POST", "/runs/")
        .match_header("authorization", "token abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"run_id": "r1"}"#)
        .create();
    let begin_test = server
        .mock("POST", "/tests/")
        .match_header("authorization", "token abc123")
        .match_body(Matcher::Json(json!({"name": "test_foo"})))
        .with_status(201)
        .with_body(r#"{"test_id": "t1"}"#)
        .create();
    let finish_test = server
        .mock("POST", "/tests/t1/finish")
        .match_body(Matcher::Json(json!({"status": "PASSED"})))
        .with_status(204)
        .create();
    let finish_run = server
        .mock("POST", "/runs/r1/finish/")
        .with_status(200)
        .create();

    let mut reporter = reporter(&server.url(), Some("abc123"), false);
    let summary = run_session(&mut reporter, vec![recorded("test_foo", Outcome::Passed)]).unwrap();

    assert_eq!(summary.passed, 1);
    assert_eq!(summary.reported, 1);
    begin_run.assert();
    begin_test.assert();
    finish_test.assert();
    finish_run.assert();
}

#[test]
fn test_no_auth_header_without_token() {
    let mut server = mockito::Server::new();

    let begin_run = server
        .mock("POST", "/runs/")
        .match_header("authorization", Matcher::Missing)
        .with_status(201)
        .with_body(r#"{"run_id": "r9"}"#)
        .create();

    let mut reporter = reporter(&server.url(), None, false);
    reporter.begin_run().unwrap();

    assert_eq!(reporter.run().run_id.as_deref(), Some("r9"));
    begin_run.assert();
}

#[test]
fn test_disabled_issues_no_requests() {
    let mut server = mockito::Server::new();
    let any = server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .expect(0)
        .create();

    let mut reporter = reporter(&server.url(), Some("abc123"), true);
    let summary = run_session(
        &mut reporter,
        vec![
            recorded("test_a", Outcome::Passed),
            recorded("test_b", Outcome::Failed),
        ],
    )
    .unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.reported, 0);
    any.assert();
}

#[test]
fn test_begin_run_error_aborts_session() {
    let mut server = mockito::Server::new();
    let begin_run = server.mock("POST", "/runs/").with_status(500).create();
    let begin_test = server
        .mock("POST", "/tests/")
        .with_status(201)
        .expect(0)
        .create();

    let mut reporter = reporter(&server.url(), None, false);
    let err = run_session(&mut reporter, vec![recorded("test_foo", Outcome::Passed)]).unwrap_err();

    assert!(matches!(err, ReportError::Status { status: 500, .. }));
    begin_run.assert();
    begin_test.assert();
}

#[test]
fn test_begin_test_not_found_skips_finish() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/runs/")
        .with_status(200)
        .with_body(r#"{"run_id": "r1"}"#)
        .create();
    let begin_test = server.mock("POST", "/tests/").with_status(404).create();
    let finish_test = server
        .mock("POST", Matcher::Regex(r"^/tests/.+/finish$".to_string()))
        .expect(0)
        .create();
    let finish_run = server
        .mock("POST", "/runs/r1/finish/")
        .with_status(200)
        .create();

    let mut reporter = reporter(&server.url(), None, false);
    let summary = run_session(&mut reporter, vec![recorded("test_foo", Outcome::Failed)]).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reported, 0);
    begin_test.assert();
    finish_test.assert();
    finish_run.assert();
}

#[test]
fn test_finish_run_error_after_tests() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/runs/")
        .with_status(200)
        .with_body(r#"{"run_id": "r1"}"#)
        .create();
    let begin_test = server
        .mock("POST", "/tests/")
        .with_status(201)
        .with_body(r#"{"test_id": "t1"}"#)
        .expect(2)
        .create();
    server
        .mock("POST", "/tests/t1/finish")
        .with_status(204)
        .expect(2)
        .create();
    server
        .mock("POST", "/runs/r1/finish/")
        .with_status(503)
        .create();

    let mut reporter = reporter(&server.url(), None, false);
    let err = run_session(
        &mut reporter,
        vec![
            recorded("test_a", Outcome::Passed),
            recorded("test_b", Outcome::Skipped),
        ],
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::Status { status: 503, .. }));
    begin_test.assert();
}

#[test]
fn test_unreachable_api_is_fatal_on_begin_run() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut reporter = reporter(&format!("http://127.0.0.1:{}", port), None, false);
    assert!(matches!(reporter.begin_run(), Err(ReportError::Http(_))));
}
