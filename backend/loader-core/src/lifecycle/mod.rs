//! Host readiness and teardown signalling.
//!
//! The original behavior hangs a callback off a global page-load event. Here
//! the trigger is an injected interface instead: the host environment holds a
//! [`HostHandle`] and signals readiness (and, optionally, teardown) through
//! it, which decouples the loader/reporter pair from any specific host and
//! lets tests drive the whole flow without a live UI surface.

use crate::error::CoreError;
use crate::loader::DocumentLoader;
use crate::report::{OutputSink, ReportOutcome, Reporter};

use log::{debug, info};
use tokio::sync::oneshot;

/// Outcome of driving one readiness event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The reporter ran and wrote a result to the sink.
    Completed(ReportOutcome),
    /// The host tore down first; the sink was never written to.
    TornDown,
}

/// Host side of the lifecycle.
///
/// Both signals are one-shot: readiness fires at most once per handle, so at
/// most one load runs per readiness event.
pub struct HostHandle {
    ready: Option<oneshot::Sender<()>>,
    teardown: Option<oneshot::Sender<()>>,
}

impl HostHandle {
    /// Signal that the host surface is ready. Repeat calls are no-ops.
    pub fn signal_ready(&mut self) {
        if let Some(tx) = self.ready.take() {
            let _ = tx.send(());
        }
    }

    /// Signal that the host surface is being torn down.
    ///
    /// An in-flight load is aborted and nothing further is written to the
    /// sink. Dropping the handle without calling this does NOT tear the run
    /// down once readiness has been signalled.
    pub fn teardown(&mut self) {
        if let Some(tx) = self.teardown.take() {
            let _ = tx.send(());
        }
    }
}

/// Driver side of the lifecycle, consumed by [`run_on_ready`].
pub struct HostLifecycle {
    ready: oneshot::Receiver<()>,
    teardown: oneshot::Receiver<()>,
}

impl HostLifecycle {
    /// Create a connected handle/lifecycle pair.
    pub fn channel() -> (HostHandle, HostLifecycle) {
        let (ready_tx, ready_rx) = oneshot::channel();
        let (teardown_tx, teardown_rx) = oneshot::channel();

        (
            HostHandle {
                ready: Some(ready_tx),
                teardown: Some(teardown_tx),
            },
            HostLifecycle {
                ready: ready_rx,
                teardown: teardown_rx,
            },
        )
    }
}

/// Resolve when teardown is signalled.
///
/// A dropped sender is not a teardown: if the handle goes away without
/// signalling, this future never resolves.
async fn wait_teardown(rx: oneshot::Receiver<()>) {
    if rx.await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Run the reporter exactly once when the host becomes ready.
///
/// * Teardown before readiness: the loader is never invoked.
/// * Teardown while the load is in flight: the request future is dropped,
///   aborting the request, and nothing is written to the sink.
/// * A handle dropped without ever signalling readiness counts as teardown.
///
/// # Errors
///
/// Returns [`CoreError`] only for render/sink failures surfaced by the
/// reporter; load failures are rendered as diagnostics, not returned.
pub async fn run_on_ready<L: DocumentLoader>(
    lifecycle: HostLifecycle,
    reporter: &Reporter,
    loader: &L,
    url: &str,
    sink: &mut dyn OutputSink,
) -> Result<RunOutcome, CoreError> {
    let HostLifecycle { ready, teardown } = lifecycle;
    let mut teardown = std::pin::pin!(wait_teardown(teardown));

    tokio::select! {
        _ = &mut teardown => {
            debug!("Torn down before readiness; skipping load of {url}");
            return Ok(RunOutcome::TornDown);
        }
        readiness = ready => {
            if readiness.is_err() {
                debug!("Host handle dropped before readiness; skipping load of {url}");
                return Ok(RunOutcome::TornDown);
            }
        }
    }

    debug!("Host ready; loading {url}");

    tokio::select! {
        _ = &mut teardown => {
            info!("Torn down while load of {url} was in flight");
            Ok(RunOutcome::TornDown)
        }
        outcome = reporter.run_once(loader, url, sink) => {
            Ok(RunOutcome::Completed(outcome?))
        }
    }
}
