use common::ErrorLocation;

use thiserror::Error;

/// Errors that can occur in the application shell.
///
/// Load failures never appear here - the Reporter renders those as
/// diagnostics. This type covers what is left: startup, configuration, and
/// the sink itself.
#[derive(Debug, Error)]
pub enum GlimpseError {
    /// Error from this app (startup, target resolution, logging)
    #[error("Glimpse Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    /// Error from loader-core operations (client construction, sink writes)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },
}
