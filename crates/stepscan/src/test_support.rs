//! Shared test support utilities for stepscan tests.
//!
//! [`WorkspaceBuilder`] writes step files, feature files and an optional
//! settings file into a temporary directory and loads them as a
//! [`Workspace`], so tests can exercise discovery, indexing and the
//! handlers against real files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Settings;
use crate::discovery::{DEFAULT_SETTINGS_PATH, Workspace};
use crate::indexing::{IndexOptions, StepIndex};

/// Result of building a test workspace.
///
/// Keeps the temporary directory alive for as long as the workspace is used.
pub struct TestWorkspace {
    /// Temporary directory containing the test files.
    pub dir: TempDir,
    /// Workspace loaded from the directory.
    pub workspace: Workspace,
}

impl TestWorkspace {
    /// Absolute path of a file inside the workspace.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Build the step index, seeding usage counts when configured.
    ///
    /// # Panics
    ///
    /// Panics if a configured glob is invalid.
    #[expect(clippy::expect_used, reason = "test helper uses expect for clarity")]
    #[must_use]
    pub fn index(&self) -> StepIndex {
        self.workspace.build_index().expect("build index")
    }
}

/// Builder for temporary workspaces with step and feature files.
pub struct WorkspaceBuilder {
    dir: TempDir,
    files: Vec<(String, String)>,
    settings: Option<String>,
}

impl WorkspaceBuilder {
    /// Create a builder over a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[expect(clippy::expect_used, reason = "builder panics on temp dir failure")]
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            files: Vec::new(),
            settings: None,
        }
    }

    /// Add a file at a path relative to the workspace root.
    #[must_use]
    pub fn with_file(mut self, relative: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((relative.into(), content.into()));
        self
    }

    /// Write `json` to the default settings location.
    #[must_use]
    pub fn with_settings(mut self, json: impl Into<String>) -> Self {
        self.settings = Some(json.into());
        self
    }

    /// Write all files and load the workspace.
    ///
    /// # Panics
    ///
    /// Panics if a file cannot be written or the settings cannot be loaded.
    #[expect(clippy::expect_used, reason = "builder panics on write failure")]
    #[must_use]
    pub fn build(self) -> TestWorkspace {
        let settings = self
            .settings
            .map(|json| (DEFAULT_SETTINGS_PATH.to_owned(), json));
        for (relative, content) in self.files.iter().chain(settings.iter()) {
            write_file(self.dir.path(), relative, content).expect("write test file");
        }
        let workspace = Workspace::load(self.dir.path(), None).expect("load workspace");
        TestWorkspace {
            dir: self.dir,
            workspace,
        }
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` to `relative` under `root`, creating parent directories.
///
/// # Errors
///
/// Returns any I/O error raised while creating directories or writing.
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// Index one in-memory source as `steps.js`.
#[must_use]
pub fn index_source(source: &str, options: &IndexOptions) -> StepIndex {
    let mut index = StepIndex::default();
    index.add_source(Path::new("steps.js"), source, options);
    index
}

/// Settings with the given step globs and feature syncing enabled.
#[must_use]
pub fn settings_with_steps(steps: &[&str]) -> Settings {
    Settings {
        steps: steps.iter().map(|glob| (*glob).to_owned()).collect(),
        sync_features: Some(crate::config::DEFAULT_FEATURE_GLOB.to_owned()),
        ..Settings::default()
    }
}
