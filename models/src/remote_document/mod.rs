pub mod builder;

pub use builder::RemoteDocumentBuilder;

use crate::ModelError;

use serde::Serialize;
use serde_json::Value;

/// A JSON document fetched from a remote URL.
///
/// The body has no fixed schema - mapping, sequence, and scalar values are
/// all valid. A document is constructed fresh on every load, is immutable
/// once built, and is discarded after rendering; nothing is cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteDocument {
    /// URL the document was fetched from.
    pub source_url: String,

    /// Decoded JSON body.
    pub body: Value,
}

impl RemoteDocument {
    /// Canonical JSON text form of the body.
    ///
    /// Compact encoding with object keys in sorted order, so two loads of
    /// unchanged remote content render to identical text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Serialization`] if the body cannot be encoded.
    pub fn canonical_text(&self) -> Result<String, ModelError> {
        let text = serde_json::to_string(&self.body)?;
        Ok(text)
    }

    /// Pretty-printed JSON text form of the body.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Serialization`] if the body cannot be encoded.
    pub fn pretty_text(&self) -> Result<String, ModelError> {
        let text = serde_json::to_string_pretty(&self.body)?;
        Ok(text)
    }
}
