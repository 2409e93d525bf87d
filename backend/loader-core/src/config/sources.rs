use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const SOURCES_FILE_NAME: &str = "sources.toml";

// ============================================
// SOURCES CONFIG STRUCTS
// ============================================

/// A curated, named fetch target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedSource {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NamedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Name of the source to load when none is requested.
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub sources: Vec<NamedSource>,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            defaults: DefaultsSection::default(),
        }
    }
}

// ============================================
// IMPLEMENTATION
// ============================================

impl SourcesConfig {
    /// Load sources.toml from the config directory.
    ///
    /// Tries multiple paths:
    /// 1. {config_dir}/config/sources.toml
    /// 2. {config_dir}/sources.toml
    /// 3. Falls back to default (no sources)
    ///
    /// # Returns
    ///
    /// Always returns `Ok(SourcesConfig)` - either loaded or default.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let paths = [
            config_dir.join("config").join(SOURCES_FILE_NAME),
            config_dir.join(SOURCES_FILE_NAME),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load_from_path(path) {
                    Ok(config) => {
                        info!("Sources loaded from {}", path.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!("Failed to load sources from {}: {}", path.display(), e);
                        // Try next path
                    }
                }
            }
        }

        warn!("No sources.toml found in config dir, using defaults");
        Ok(Self::default())
    }

    /// Load from specific path (internal helper).
    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: SourcesConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate source entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for source in &self.sources {
            if source.name.is_empty() {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: "Source name cannot be empty".to_string(),
                });
            }

            if self.sources.iter().filter(|s| s.name == source.name).count() > 1 {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Duplicate source name '{}'", source.name),
                });
            }

            if !source.url.starts_with("http://") && !source.url.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Invalid URL for source '{}': {}", source.name, source.url),
                });
            }
        }

        if let Some(ref default) = self.defaults.source {
            if self.get_source(default).is_none() {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Default source '{}' is not a listed source", default),
                });
            }
        }

        Ok(())
    }

    /// Get source by name.
    pub fn get_source(&self, name: &str) -> Option<&NamedSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// The source named by `defaults.source`, if any.
    pub fn default_source(&self) -> Option<&NamedSource> {
        self.defaults
            .source
            .as_deref()
            .and_then(|name| self.get_source(name))
    }
}
