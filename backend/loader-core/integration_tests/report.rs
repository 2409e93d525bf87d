// End-to-end tests: readiness event -> load -> render -> sink, against a
// local mock server.

use loader_core::lifecycle::{HostLifecycle, RunOutcome, run_on_ready};
use loader_core::loader::{DEFAULT_TIMEOUT_DURATION, JsonLoader};
use loader_core::report::{MemorySink, RenderFormat, ReportOutcome, Reporter};

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn loader() -> JsonLoader {
    JsonLoader::new(DEFAULT_TIMEOUT_DURATION).expect("loader should construct")
}

/// **VALUE**: Verifies the full pipeline writes the canonical text for a
/// successful load, issuing exactly one request.
///
/// **WHY THIS MATTERS**: This is the component's contract end to end: one
/// readiness event, one GET, and the sink receives exactly `{"a":1}` for a
/// body of `{"a":1}`. The mock server's expectation independently pins the
/// no-duplicate-request property at the network level.
///
/// **BUG THIS CATCHES**: Would catch double-fires of the readiness wiring
/// (two requests) and any decoration of the rendered output.
#[tokio::test]
async fn given_ready_host_when_driven_then_sink_gets_canonical_text_with_one_request() {
    // GIVEN: A server expecting exactly one GET for {"a":1}
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();

    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving one readiness event
    let url = format!("{}/test.json", server.uri());
    let outcome = run_on_ready(lifecycle, &reporter, &loader(), &url, &mut sink)
        .await
        .expect("Drive should succeed");

    // THEN: One sink entry with the exact canonical text; the mock server
    // verifies the single-request expectation when it drops
    assert_eq!(outcome, RunOutcome::Completed(ReportOutcome::Document));
    assert_eq!(sink.entries(), [r#"{"a":1}"#.to_string()]);
}

/// **VALUE**: Verifies a 404 end to end: diagnostic on the sink, no panic,
/// no error out of the drive.
///
/// **WHY THIS MATTERS**: The hardened failure contract - render a
/// human-readable message containing the status instead of letting the
/// failure propagate to the host.
///
/// **BUG THIS CATCHES**: Would catch the load error escaping `run_on_ready`
/// or the diagnostic losing the status code.
#[tokio::test]
async fn given_404_response_when_driven_then_sink_gets_diagnostic_containing_404() {
    // GIVEN: A server answering 404
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();

    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving one readiness event
    let url = format!("{}/missing.json", server.uri());
    let outcome = run_on_ready(lifecycle, &reporter, &loader(), &url, &mut sink)
        .await
        .expect("A failed load should not error the drive");

    // THEN: A diagnostic naming the status landed on the sink
    assert_eq!(outcome, RunOutcome::Completed(ReportOutcome::Diagnostic));
    assert_eq!(sink.entries().len(), 1);
    assert!(sink.entries()[0].contains("404"));
}

/// **VALUE**: Verifies teardown aborts a slow in-flight request without
/// writing to the sink.
///
/// **WHY THIS MATTERS**: When the host surface goes away mid-request, the
/// hardened behavior is to drop the request and never touch the disposed
/// output surface.
///
/// **BUG THIS CATCHES**: Would catch the drive waiting out the full response
/// delay, or a late write landing on the sink after cancellation.
#[tokio::test]
async fn given_slow_response_when_torn_down_mid_flight_then_sink_untouched() {
    // GIVEN: A server that delays its response well past the test's patience
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"a":1}"#, "application/json")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();

    // Teardown fires while the request is in flight
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.teardown();
    });

    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving one readiness event
    let url = format!("{}/slow.json", server.uri());
    let outcome = run_on_ready(lifecycle, &reporter, &loader(), &url, &mut sink)
        .await
        .expect("Teardown should not error the drive");

    // THEN: Torn down, nothing written
    assert_eq!(outcome, RunOutcome::TornDown);
    assert!(sink.is_empty(), "Sink should be untouched after teardown");
}

/// Pretty rendering flows through the full pipeline too.
#[tokio::test]
async fn given_pretty_reporter_when_driven_then_sink_gets_indented_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"a":1,"b":2}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();

    let reporter = Reporter::new(RenderFormat::Pretty);
    let mut sink = MemorySink::new();

    let url = format!("{}/test.json", server.uri());
    run_on_ready(lifecycle, &reporter, &loader(), &url, &mut sink)
        .await
        .expect("Drive should succeed");

    assert!(sink.entries()[0].contains('\n'), "Pretty output should be multi-line");
}
