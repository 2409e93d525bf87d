use crate::RemoteDocument;
use crate::error::model_error::ModelError;

use common::ErrorLocation;

use std::panic::Location;

use serde_json::Value;

/// Builder for creating validated RemoteDocument instances.
///
/// Provides a fluent API for constructing a document while enforcing the
/// invariants the rest of the system relies on (non-empty http/https source
/// URL, body present).
#[derive(Debug, Default)]
pub struct RemoteDocumentBuilder {
    source_url: Option<String>,
    body: Option<Value>,
}

impl RemoteDocumentBuilder {
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Build the RemoteDocument with validation.
    #[track_caller]
    pub fn build(self) -> Result<RemoteDocument, ModelError> {
        let source_url = self.source_url.ok_or_else(|| ModelError::Validation {
            message: String::from("Source URL is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if source_url.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Source URL cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !source_url.starts_with("http://") && !source_url.starts_with("https://") {
            return Err(ModelError::Validation {
                message: format!("Invalid source URL format: {source_url}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = self.body.ok_or_else(|| ModelError::Validation {
            message: String::from("Body is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(RemoteDocument { source_url, body })
    }
}
