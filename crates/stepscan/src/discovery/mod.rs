//! Workspace discovery: settings, step files and feature files.
//!
//! A [`Workspace`] ties a root directory to its [`Settings`]. It expands the
//! configured globs into the file lists the index is built from and reports
//! configured step globs that match nothing.

use std::path::{Path, PathBuf};

use lsp_types::{Diagnostic, DiagnosticSeverity, Range};
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{ConfigError, DiscoveryError, StepscanError};
use crate::handlers::{DIAGNOSTIC_SOURCE, seed_usage_counts};
use crate::indexing::StepIndex;
use crate::util::byte_offset_to_position;

mod paths;

pub use paths::{compile_glob, expand_glob};

/// Settings file read when none is given explicitly.
pub const DEFAULT_SETTINGS_PATH: &str = ".vscode/settings.json";

/// Message of the warning raised for step globs matching no files.
pub const NO_STEPS_MESSAGE: &str = "No steps files found";

/// A workspace root and the settings that apply to it.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory all configured globs are relative to.
    pub root: PathBuf,
    /// Parsed settings.
    pub settings: Settings,
    /// Settings file the settings were read from, if any.
    pub settings_path: Option<PathBuf>,
    settings_text: String,
}

impl Workspace {
    /// Create a workspace from already-parsed settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root: root.into(),
            settings,
            settings_path: None,
            settings_text: String::new(),
        }
    }

    /// Load the workspace rooted at `root`.
    ///
    /// Settings come from `settings_path` when given, otherwise from
    /// [`DEFAULT_SETTINGS_PATH`] under the root when that file exists. With
    /// no settings file, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::MissingRoot`] when `root` is not a
    /// directory, and a [`ConfigError`] when the settings file cannot be read
    /// or parsed.
    pub fn load(root: &Path, settings_path: Option<&Path>) -> Result<Self, StepscanError> {
        if !root.is_dir() {
            return Err(DiscoveryError::MissingRoot(root.to_path_buf()).into());
        }
        let settings_path = settings_path.map(Path::to_path_buf).or_else(|| {
            let default = root.join(DEFAULT_SETTINGS_PATH);
            default.is_file().then_some(default)
        });
        let Some(path) = settings_path else {
            info!(root = %root.display(), "no settings file, using defaults");
            return Ok(Self::new(root, Settings::default()));
        };
        let settings_text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = Settings::from_json_str(&settings_text)?;
        info!(
            root = %root.display(),
            settings = %path.display(),
            step_globs = settings.steps.len(),
            "loaded workspace settings"
        );
        Ok(Self {
            root: root.to_path_buf(),
            settings,
            settings_path: Some(path),
            settings_text,
        })
    }

    /// Step-definition files matched by the configured globs.
    ///
    /// Files are listed once, in glob order and sorted within each glob.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] when a glob is invalid.
    pub fn step_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        let mut files: Vec<PathBuf> = Vec::new();
        for glob in &self.settings.steps {
            for file in expand_glob(&self.root, glob)? {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        Ok(files)
    }

    /// Feature files matched by the `syncfeatures` glob, if configured.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] when the glob is invalid.
    pub fn feature_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        self.settings
            .sync_features
            .as_deref()
            .map_or_else(|| Ok(Vec::new()), |glob| expand_glob(&self.root, glob))
    }

    /// Build the step index and seed usage counts from feature files.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] when a configured glob is invalid.
    pub fn build_index(&self) -> Result<StepIndex, DiscoveryError> {
        let mut index = StepIndex::build(&self.step_files()?, &self.settings.index_options());
        let features = self.feature_files()?;
        if !features.is_empty() {
            seed_usage_counts(&mut index, &features);
        }
        Ok(index)
    }

    /// Rebuild `previous` from the current files, keeping its usage counts.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] when a configured glob is invalid.
    pub fn rebuild_index(&self, previous: &StepIndex) -> Result<StepIndex, DiscoveryError> {
        Ok(previous.rebuild(&self.step_files()?, &self.settings.index_options()))
    }

    /// Warnings for configured step globs that match no files.
    #[must_use]
    pub fn configuration_diagnostics(&self) -> Vec<Diagnostic> {
        validate_configuration(&self.settings_text, &self.settings.steps, &self.root)
    }
}

/// Report each step glob in `steps` that matches no files under `root`.
///
/// The warning is anchored at the quoted glob inside `settings_text`, or at
/// the start of the file when the glob cannot be found there. Invalid globs
/// are reported the same way.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use stepscan::discovery::validate_configuration;
///
/// let settings = r#"{ "cucumberautocomplete.steps": ["steps/*.js"] }"#;
/// let root = Path::new("no-such-workspace");
/// let warnings = validate_configuration(settings, &["steps/*.js".to_owned()], root);
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].message, "No steps files found");
/// assert_eq!(warnings[0].range.start.character, 33);
/// ```
#[must_use]
pub fn validate_configuration(settings_text: &str, steps: &[String], root: &Path) -> Vec<Diagnostic> {
    steps
        .iter()
        .filter(|glob| {
            expand_glob(root, glob).map_or_else(
                |err| {
                    warn!(error = %err, "cannot expand step glob");
                    true
                },
                |files| files.is_empty(),
            )
        })
        .map(|glob| Diagnostic {
            range: quoted_range(settings_text, search_term(glob, root)),
            severity: Some(DiagnosticSeverity::WARNING),
            source: Some(DIAGNOSTIC_SOURCE.to_owned()),
            message: NO_STEPS_MESSAGE.to_owned(),
            ..Diagnostic::default()
        })
        .collect()
}

/// The glob as it would be written in the settings file.
fn search_term<'a>(glob: &'a str, root: &Path) -> &'a str {
    let prefix = format!("{}/", root.display());
    glob.strip_prefix(prefix.as_str()).unwrap_or(glob)
}

fn quoted_range(text: &str, term: &str) -> Range {
    let quoted = format!("\"{term}\"");
    text.find(&quoted).map_or_else(Range::default, |start| {
        Range::new(
            byte_offset_to_position(text, start),
            byte_offset_to_position(text, start + quoted.len()),
        )
    })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require explicit panic messages")]
mod tests {
    use std::fs;

    use lsp_types::Position;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write file");
    }

    #[test]
    fn loads_default_settings_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(
            dir.path(),
            DEFAULT_SETTINGS_PATH,
            r#"{ "cucumberautocomplete.steps": ["steps/*.js"], "cucumberautocomplete.syncfeatures": true }"#,
        );
        write(dir.path(), "steps/a.js", "Given('I have {int} cats', fn);");
        write(dir.path(), "features/a.feature", "Given I have 2 cats\nGiven I have 3 cats\n");

        let workspace = Workspace::load(dir.path(), None).expect("workspace");
        assert_eq!(workspace.settings_path, Some(dir.path().join(DEFAULT_SETTINGS_PATH)));
        let index = workspace.build_index().expect("index");
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries().first().map(|e| e.usage_count), Some(2));
        assert!(workspace.configuration_diagnostics().is_empty());
    }

    #[test]
    fn missing_settings_use_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let workspace = Workspace::load(dir.path(), None).expect("workspace");
        assert_eq!(workspace.settings, Settings::default());
        assert!(workspace.build_index().expect("index").is_empty());
    }

    #[test]
    fn reports_unreadable_settings() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("settings.json");
        let err = Workspace::load(dir.path(), Some(&missing)).expect_err("missing settings");
        assert!(matches!(err, StepscanError::Config(ConfigError::Read { .. })));
    }

    #[test]
    fn step_files_are_listed_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "steps/a.js", "");
        write(dir.path(), "steps/b.ts", "");
        let settings = Settings {
            steps: vec!["steps/*.js".to_owned(), "steps/*".to_owned()],
            ..Settings::default()
        };
        let workspace = Workspace::new(dir.path(), settings);
        let files = workspace.step_files().expect("files");
        assert_eq!(
            files,
            vec![dir.path().join("steps/a.js"), dir.path().join("steps/b.ts")]
        );
    }

    #[test]
    fn warns_about_empty_step_globs() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "steps/a.js", "");
        let text = "{\n  \"cucumberautocomplete.steps\": [\n    \"steps/*.js\",\n    \"missing/*.js\"\n  ]\n}";
        let steps = vec!["steps/*.js".to_owned(), "missing/*.js".to_owned()];
        let warnings = validate_configuration(text, &steps, dir.path());
        assert_eq!(warnings.len(), 1);
        let warning = warnings.first().expect("warning");
        assert_eq!(warning.range.start, Position::new(3, 4));
        assert_eq!(warning.range.end, Position::new(3, 18));
        assert_eq!(warning.severity, Some(DiagnosticSeverity::WARNING));
    }

    #[test]
    fn unanchored_warnings_start_at_origin() {
        let dir = tempfile::tempdir().expect("temp dir");
        let warnings = validate_configuration("{}", &["none/*.js".to_owned()], dir.path());
        assert_eq!(warnings.first().map(|w| w.range), Some(Range::default()));
    }
}
