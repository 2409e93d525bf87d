// Unit tests for readiness/teardown driving.
// These use counting and never-resolving stub loaders so no network is involved.

use crate::error::loader::LoaderError;
use crate::lifecycle::{HostLifecycle, RunOutcome, run_on_ready};
use crate::loader::DocumentLoader;
use crate::report::{MemorySink, RenderFormat, ReportOutcome, Reporter};

use models::{RemoteDocument, RemoteDocumentBuilder};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;

struct CountingLoader {
    calls: AtomicUsize,
}

impl CountingLoader {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentLoader for CountingLoader {
    async fn load(&self, url: &str) -> Result<RemoteDocument, LoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let document = RemoteDocumentBuilder::default()
            .with_source_url(url)
            .with_body(json!({"a": 1}))
            .build()
            .unwrap();
        Ok(document)
    }
}

/// Loader whose request never completes, for in-flight teardown tests.
struct PendingLoader;

impl DocumentLoader for PendingLoader {
    async fn load(&self, _url: &str) -> Result<RemoteDocument, LoaderError> {
        std::future::pending().await
    }
}

/// **VALUE**: Verifies the one-load-per-readiness-event invariant.
///
/// **WHY THIS MATTERS**: The contract promises no duplicate network calls: a
/// single readiness event must produce exactly one load. Double-loading
/// would double traffic against every configured source.
///
/// **BUG THIS CATCHES**: Would catch a refactor that retries the load, or
/// wires the readiness signal so it can fire the reporter twice.
#[tokio::test]
async fn given_ready_signal_when_run_on_ready_called_then_loader_invoked_exactly_once() {
    // GIVEN: A ready host and a counting loader
    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();

    let loader = CountingLoader::new();
    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving the lifecycle
    let outcome = run_on_ready(
        lifecycle,
        &reporter,
        &loader,
        "http://127.0.0.1/test.json",
        &mut sink,
    )
    .await
    .unwrap();

    // THEN: Exactly one load and one sink write
    assert_eq!(outcome, RunOutcome::Completed(ReportOutcome::Document));
    assert_eq!(loader.calls(), 1, "Loader should run exactly once");
    assert_eq!(sink.entries().len(), 1);
}

/// **VALUE**: Verifies teardown before readiness suppresses the load entirely.
///
/// **WHY THIS MATTERS**: A host surface that is disposed before it ever
/// becomes ready must not trigger network traffic or sink writes.
///
/// **BUG THIS CATCHES**: Would catch if the readiness wait is removed and
/// the load starts unconditionally.
#[tokio::test]
async fn given_teardown_before_ready_when_run_on_ready_called_then_loader_never_invoked() {
    // GIVEN: A host that tears down without ever becoming ready
    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.teardown();

    let loader = CountingLoader::new();
    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving the lifecycle
    let outcome = run_on_ready(
        lifecycle,
        &reporter,
        &loader,
        "http://127.0.0.1/test.json",
        &mut sink,
    )
    .await
    .unwrap();

    // THEN: No load, no output
    assert_eq!(outcome, RunOutcome::TornDown);
    assert_eq!(loader.calls(), 0, "Loader should never run");
    assert!(sink.is_empty(), "Sink should be untouched");
}

/// **VALUE**: Verifies teardown aborts an in-flight load without touching the
/// sink.
///
/// **WHY THIS MATTERS**: When the host surface goes away mid-request, the
/// request must be dropped and nothing written to a disposed output
/// surface.
///
/// **BUG THIS CATCHES**: Would catch if the run awaits the load to completion
/// before honoring teardown, or writes a partial result after cancellation.
#[tokio::test]
async fn given_teardown_mid_flight_when_run_on_ready_called_then_sink_untouched() {
    // GIVEN: A ready host and a load that never completes
    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();

    // Teardown fires shortly after the load is in flight
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.teardown();
    });

    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving the lifecycle
    let outcome = run_on_ready(
        lifecycle,
        &reporter,
        &PendingLoader,
        "http://127.0.0.1/slow.json",
        &mut sink,
    )
    .await
    .unwrap();

    // THEN: Torn down, nothing written
    assert_eq!(outcome, RunOutcome::TornDown);
    assert!(sink.is_empty(), "Sink should be untouched after teardown");
}

/// **VALUE**: Verifies a handle dropped without signalling counts as teardown.
///
/// **BUG THIS CATCHES**: Would catch if a vanished host left the driver
/// waiting on a readiness signal that can never arrive.
#[tokio::test]
async fn given_handle_dropped_when_run_on_ready_called_then_returns_torn_down() {
    // GIVEN: A host whose handle is dropped unsignalled
    let (handle, lifecycle) = HostLifecycle::channel();
    drop(handle);

    let loader = CountingLoader::new();
    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving the lifecycle
    let outcome = run_on_ready(
        lifecycle,
        &reporter,
        &loader,
        "http://127.0.0.1/test.json",
        &mut sink,
    )
    .await
    .unwrap();

    // THEN: Treated as teardown
    assert_eq!(outcome, RunOutcome::TornDown);
    assert_eq!(loader.calls(), 0);
}

/// **VALUE**: Verifies a handle dropped AFTER readiness does not cancel the run.
///
/// **WHY THIS MATTERS**: The common host pattern is signal-and-forget. If
/// dropping the handle cancelled the load, every such host would see
/// phantom teardowns.
///
/// **BUG THIS CATCHES**: Would catch if the teardown wait treats a closed
/// channel as a teardown signal.
#[tokio::test]
async fn given_handle_dropped_after_ready_when_run_on_ready_called_then_run_completes() {
    // GIVEN: A host that signals readiness and then goes away
    let (mut handle, lifecycle) = HostLifecycle::channel();
    handle.signal_ready();
    drop(handle);

    let loader = CountingLoader::new();
    let reporter = Reporter::new(RenderFormat::Compact);
    let mut sink = MemorySink::new();

    // WHEN: Driving the lifecycle
    let outcome = run_on_ready(
        lifecycle,
        &reporter,
        &loader,
        "http://127.0.0.1/test.json",
        &mut sink,
    )
    .await
    .unwrap();

    // THEN: The run completes normally
    assert_eq!(outcome, RunOutcome::Completed(ReportOutcome::Document));
    assert_eq!(loader.calls(), 1);
}
