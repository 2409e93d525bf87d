use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}", path = .path.display())]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}", path = .path.display())]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Serialize Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}", path = .path.display())]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}
