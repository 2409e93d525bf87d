use common::{ErrorLocation, HttpStatusCode};

use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LoaderError {
    /// Connection, DNS, timeout, or body-read failure.
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    /// The server answered with a non-success status.
    #[error("HTTP Error: {status} {message} {location}")]
    Http {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// The response body was not valid JSON.
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    /// The HTTP client itself could not be constructed.
    #[error("Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },

    /// The fetched payload failed document validation.
    #[error("Document Error: {message} {location}")]
    Document {
        message: String,
        location: ErrorLocation,
    },
}

impl LoaderError {
    /// Status code of an HTTP failure, if that is what this is.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            LoaderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LoaderError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        LoaderError::Network {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for LoaderError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        LoaderError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for LoaderError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        LoaderError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for LoaderError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        LoaderError::Document {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
