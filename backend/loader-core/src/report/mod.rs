pub mod sink;

pub use sink::{MemorySink, OutputSink, StdoutSink};

use crate::error::report::ReportError;
use crate::loader::DocumentLoader;

use models::RemoteDocument;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Text form a successful load is rendered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RenderFormat {
    /// Canonical compact JSON (sorted object keys, no whitespace).
    Compact,
    /// Indented JSON for human eyes.
    Pretty,
}

impl Default for RenderFormat {
    fn default() -> Self {
        RenderFormat::Compact
    }
}

/// What the reporter wrote to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The load succeeded and the document text was appended.
    Document,
    /// The load failed and a diagnostic was appended instead.
    Diagnostic,
}

/// Renders load results onto an output sink.
pub struct Reporter {
    format: RenderFormat,
}

impl Reporter {
    pub fn new(format: RenderFormat) -> Self {
        Self { format }
    }

    /// Load `url` once and append the rendered result to `sink`.
    ///
    /// A failed load is rendered as a human-readable diagnostic rather than
    /// propagated - the host process must never crash because the remote
    /// side misbehaved. Only a render or sink failure is an error of this
    /// call. The loader is invoked exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the document cannot be rendered or the
    /// sink rejects the write.
    pub async fn run_once<L: DocumentLoader>(
        &self,
        loader: &L,
        url: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<ReportOutcome, ReportError> {
        match loader.load(url).await {
            Ok(document) => {
                let text = self.render(&document)?;
                sink.append(&text)?;
                info!("Reported document from {url}");
                Ok(ReportOutcome::Document)
            }
            Err(error) => {
                warn!("Load failed for {url}: {error}");
                sink.append(&format!("Failed to load {url}: {error}"))?;
                Ok(ReportOutcome::Diagnostic)
            }
        }
    }

    fn render(&self, document: &RemoteDocument) -> Result<String, ReportError> {
        let text = match self.format {
            RenderFormat::Compact => document.canonical_text()?,
            RenderFormat::Pretty => document.pretty_text()?,
        };
        Ok(text)
    }
}
