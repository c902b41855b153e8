//! Runtime and workspace configuration.
//!
//! Two layers exist. [`RuntimeConfig`] controls the process itself and is read
//! from `STEPSCAN_` environment variables with CLI overrides on top.
//! [`Settings`] describes the workspace being indexed and is loaded from a
//! JSON settings file, either an editor `settings.json` using
//! `cucumberautocomplete.*` keys or a plain object with the same keys.

use std::env;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};
use stepscan_patterns::CustomParameter;

use crate::error::ConfigError;
use crate::indexing::IndexOptions;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information, including dropped step candidates.
    Debug,
    /// Standard informational messages.
    #[default]
    Info,
    /// Warning messages for unreadable files and similar problems.
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidValue(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Process-level configuration.
///
/// # Environment Variables
///
/// - `STEPSCAN_LOG_LEVEL`: Sets the log level (trace, debug, info, warn,
///   error)
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `STEPSCAN_LOG_LEVEL` holds an
    /// unknown level.
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_level = match env::var("STEPSCAN_LOG_LEVEL") {
            Ok(val) => val.parse()?,
            Err(_) => LogLevel::default(),
        };
        Ok(Self { log_level })
    }

    /// Apply CLI overrides, which take precedence over the environment.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}

/// Prefix used by editor settings files.
const SETTINGS_NAMESPACE: &str = "cucumberautocomplete";

/// Glob used when `syncfeatures` is `true`.
pub const DEFAULT_FEATURE_GLOB: &str = "**/*.feature";

/// One glob or a list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum GlobList {
    One(String),
    Many(Vec<String>),
}

impl Default for GlobList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// `syncfeatures` accepts a flag or an explicit glob.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum FeatureSync {
    Enabled(bool),
    Glob(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(default)]
    steps: GlobList,
    #[serde(default, rename = "syncfeatures")]
    sync_features: Option<FeatureSync>,
    #[serde(default)]
    strict_gherkin_completion: bool,
    #[serde(default)]
    smart_snippets: bool,
    #[serde(default)]
    steps_invariants: bool,
    #[serde(default)]
    custom_parameters: Vec<CustomParameter>,
}

/// Workspace settings controlling discovery and matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Globs, relative to the workspace root, of step-definition files.
    pub steps: Vec<String>,
    /// Glob of feature files used to seed usage counts, if any.
    pub sync_features: Option<String>,
    /// Filter completions by keyword category.
    pub strict_gherkin_completion: bool,
    /// Turn parameter-shaped fragments into snippet tab stops.
    pub smart_snippets: bool,
    /// Expand `(a|b)` groups into separate steps.
    pub steps_invariants: bool,
    /// Literal substitutions applied before normalisation.
    pub custom_parameters: Vec<CustomParameter>,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let steps = match raw.steps {
            GlobList::One(glob) => vec![glob],
            GlobList::Many(globs) => globs,
        };
        let sync_features = match raw.sync_features {
            Some(FeatureSync::Enabled(true)) => Some(DEFAULT_FEATURE_GLOB.to_owned()),
            Some(FeatureSync::Glob(glob)) => Some(glob),
            Some(FeatureSync::Enabled(false)) | None => None,
        };
        Self {
            steps,
            sync_features,
            strict_gherkin_completion: raw.strict_gherkin_completion,
            smart_snippets: raw.smart_snippets,
            steps_invariants: raw.steps_invariants,
            custom_parameters: raw.custom_parameters,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    ///
    /// Three layouts are accepted: a `cucumberautocomplete` object, flat
    /// `cucumberautocomplete.<key>` entries as written by editors, or the keys
    /// at the top level. Unrelated keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when the text is not JSON or a known key
    /// has the wrong type.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepscan::config::Settings;
    ///
    /// let settings = Settings::from_json_str(
    ///     r#"{ "cucumberautocomplete.steps": ["steps/**/*.js"], "cucumberautocomplete.syncfeatures": true }"#,
    /// )
    /// .unwrap_or_default();
    /// assert_eq!(settings.steps, vec!["steps/**/*.js"]);
    /// assert_eq!(settings.sync_features.as_deref(), Some("**/*.feature"));
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        let raw: RawSettings = serde_json::from_value(Value::Object(namespaced_object(value)))?;
        Ok(raw.into())
    }

    /// Options passed to the indexer and the request handlers.
    #[must_use]
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            steps_invariants: self.steps_invariants,
            smart_snippets: self.smart_snippets,
            custom_parameters: self.custom_parameters.clone(),
            strict_gherkin_completion: self.strict_gherkin_completion,
        }
    }
}

fn namespaced_object(value: Value) -> Map<String, Value> {
    let Value::Object(mut root) = value else {
        return Map::new();
    };
    if let Some(Value::Object(nested)) = root.remove(SETTINGS_NAMESPACE) {
        return nested;
    }
    let prefix = format!("{SETTINGS_NAMESPACE}.");
    let flat: Map<String, Value> = root
        .iter()
        .filter_map(|(key, val)| {
            key.strip_prefix(&prefix)
                .map(|short| (short.to_owned(), val.clone()))
        })
        .collect();
    if flat.is_empty() { root } else { flat }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("debug", LogLevel::Debug)]
    #[case("info", LogLevel::Info)]
    #[case("warn", LogLevel::Warn)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    #[case("TRACE", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    fn log_level_parses_valid_values(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let err = "invalid"
            .parse::<LogLevel>()
            .expect_err("unknown level should be rejected");
        assert!(err.to_string().contains("unknown log level"));
    }

    #[test]
    fn runtime_config_apply_overrides() {
        let config = RuntimeConfig::default().apply_overrides(Some(LogLevel::Error));
        assert_eq!(config.log_level, LogLevel::Error);

        let config = RuntimeConfig::default().apply_overrides(None);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn parses_nested_settings_object() {
        let settings = Settings::from_json_str(
            r#"{
                "cucumberautocomplete": {
                    "steps": "steps/*.ts",
                    "syncfeatures": "features/**/*.feature",
                    "strictGherkinCompletion": true,
                    "smartSnippets": true,
                    "stepsInvariants": true,
                    "customParameters": [{ "parameter": "${dog}", "value": "(rex|fido)" }]
                },
                "editor.tabSize": 2
            }"#,
        )
        .expect("settings should parse");
        assert_eq!(settings.steps, vec!["steps/*.ts"]);
        assert_eq!(settings.sync_features.as_deref(), Some("features/**/*.feature"));
        assert!(settings.strict_gherkin_completion);
        assert!(settings.smart_snippets);
        assert!(settings.steps_invariants);
        assert_eq!(settings.custom_parameters.len(), 1);
    }

    #[test]
    fn parses_flat_editor_keys() {
        let settings = Settings::from_json_str(
            r#"{
                "cucumberautocomplete.steps": ["a/*.js", "b/*.js"],
                "cucumberautocomplete.syncfeatures": false,
                "files.exclude": {}
            }"#,
        )
        .expect("settings should parse");
        assert_eq!(settings.steps, vec!["a/*.js", "b/*.js"]);
        assert_eq!(settings.sync_features, None);
        assert!(!settings.smart_snippets);
    }

    #[test]
    fn parses_top_level_keys() {
        let settings = Settings::from_json_str(r#"{ "steps": ["s/*.rb"], "syncfeatures": true }"#)
            .expect("settings should parse");
        assert_eq!(settings.steps, vec!["s/*.rb"]);
        assert_eq!(settings.sync_features.as_deref(), Some(DEFAULT_FEATURE_GLOB));
    }

    #[test]
    fn rejects_wrongly_typed_values() {
        let err = Settings::from_json_str(r#"{ "smartSnippets": "yes" }"#)
            .expect_err("string flag should be rejected");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn index_options_mirror_settings() {
        let settings = Settings {
            steps_invariants: true,
            strict_gherkin_completion: true,
            ..Settings::default()
        };
        let options = settings.index_options();
        assert!(options.steps_invariants);
        assert!(options.strict_gherkin_completion);
        assert!(!options.smart_snippets);
    }
}
