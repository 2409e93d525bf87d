use crate::CLIENT_USER_AGENT;
use crate::error::loader::LoaderError;

use common::{ErrorLocation, HttpStatusCode};

use models::{RemoteDocument, RemoteDocumentBuilder};

use std::panic::Location;
use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// Upper bound on how much of a failed response body lands in the diagnostic.
const ERROR_BODY_SNIPPET_MAX: usize = 256;

/// Source of remote JSON documents.
///
/// The seam between the Reporter and the concrete HTTP stack. Production
/// code uses [`JsonLoader`]; tests drive the Reporter with stub
/// implementations instead of a live server.
pub trait DocumentLoader {
    async fn load(&self, url: &str) -> Result<RemoteDocument, LoaderError>;
}

/// HTTP loader that fetches a URL and decodes the body as JSON.
#[derive(Clone)]
pub struct JsonLoader {
    client: Client,
}

impl JsonLoader {
    /// Create a loader with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Client`] if the underlying HTTP client cannot
    /// be constructed.
    #[track_caller]
    pub fn new(timeout: Duration) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(|e| LoaderError::Client {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { client })
    }
}

impl DocumentLoader for JsonLoader {
    /// Fetch `url` with one HTTP GET and decode the body as JSON.
    ///
    /// Exactly one network call per invocation - no retries, no caching.
    /// The call suspends the task until the round-trip completes; it never
    /// blocks the runtime.
    ///
    /// # Errors
    ///
    /// * [`LoaderError::UrlParse`] - `url` is empty or malformed (rejected
    ///   before any network activity)
    /// * [`LoaderError::Network`] - connection, DNS, timeout, or body-read
    ///   failure
    /// * [`LoaderError::Http`] - non-2xx status, carries the status code
    /// * [`LoaderError::Decode`] - body is not valid JSON
    async fn load(&self, url: &str) -> Result<RemoteDocument, LoaderError> {
        let target = Url::parse(url)?;

        debug!("Fetching {target}");

        let response = self.client.get(target).send().await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_success() {
            return Err(LoaderError::Http {
                status,
                message: snippet(&response.text().await.unwrap_or_default()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        let document = RemoteDocumentBuilder::default()
            .with_source_url(url)
            .with_body(body)
            .build()?;

        info!("Loaded {} ({} bytes)", document.source_url, bytes.len());

        Ok(document)
    }
}

/// Bounded, trimmed view of a response body for error messages.
fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= ERROR_BODY_SNIPPET_MAX {
        return trimmed.to_string();
    }

    let cut: String = trimmed.chars().take(ERROR_BODY_SNIPPET_MAX).collect();
    format!("{cut}...")
}
