//! Semantic error types for stepscan.
//!
//! Per-candidate failures (a template that does not compile, a file that
//! cannot be read while indexing) are logged and skipped rather than raised.
//! The types here cover the failures a caller has to act on: bad
//! configuration and bad discovery globs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidValue(String),

    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid JSON of the expected shape.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while expanding step or feature globs.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A configured glob pattern is malformed.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Underlying parse error.
        source: globset::Error,
    },

    /// The workspace root does not exist or is not a directory.
    #[error("workspace root {0} is not a directory")]
    MissingRoot(PathBuf),
}

/// Top-level error type for workspace operations.
#[derive(Debug, Error)]
pub enum StepscanError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Files could not be discovered.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_displays_message() {
        let error = ConfigError::InvalidValue("unknown log level".to_string());
        assert_eq!(error.to_string(), "invalid configuration: unknown log level");
    }

    #[test]
    fn read_error_names_path() {
        let error = ConfigError::Read {
            path: PathBuf::from("settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            error.to_string(),
            "failed to read settings file settings.json: missing"
        );
    }

    #[test]
    fn config_error_is_transparent_in_top_level_error() {
        let error: StepscanError = ConfigError::InvalidValue("x".to_string()).into();
        assert_eq!(error.to_string(), "invalid configuration: x");
    }

    #[test]
    fn missing_root_displays_path() {
        let error: StepscanError = DiscoveryError::MissingRoot(PathBuf::from("/nowhere")).into();
        assert_eq!(error.to_string(), "workspace root /nowhere is not a directory");
    }
}
