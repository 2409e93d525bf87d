//! Output sinks for rendered reports.
//!
//! A sink is an append-only text surface. The process plays the role the
//! page body played in a browser host: [`StdoutSink`] appends to stdout,
//! [`MemorySink`] captures appends for tests and embedders.

use crate::error::report::ReportError;

use std::io::Write;

/// Append-only destination for rendered output.
pub trait OutputSink {
    /// Append one rendered report to the surface.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Sink`] if the surface rejects the write.
    fn append(&mut self, text: &str) -> Result<(), ReportError>;
}

/// Sink that appends each report as a line on stdout.
///
/// Stdout is reserved for reports; log records go to stderr and the log
/// file, so the output stays machine-consumable.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn append(&mut self, text: &str) -> Result<(), ReportError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{text}")?;
        handle.flush()?;
        Ok(())
    }
}

/// Sink that captures appended text in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far, in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn append(&mut self, text: &str) -> Result<(), ReportError> {
        self.entries.push(text.to_string());
        Ok(())
    }
}
