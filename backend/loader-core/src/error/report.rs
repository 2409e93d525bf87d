use common::ErrorLocation;

use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ReportError {
    /// The output sink rejected an append.
    #[error("Sink Error: {message} {location}")]
    Sink {
        message: String,
        location: ErrorLocation,
    },

    /// A document could not be rendered to text.
    #[error("Render Error: {message} {location}")]
    Render {
        message: String,
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for ReportError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        ReportError::Sink {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ReportError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ReportError::Render {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
