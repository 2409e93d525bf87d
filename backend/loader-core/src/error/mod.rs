pub mod config;
pub mod loader;
pub mod report;

pub use config::ConfigError;
pub use loader::LoaderError;
pub use report::ReportError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Loader(#[from] loader::LoaderError),

    #[error(transparent)]
    Report(#[from] report::ReportError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
