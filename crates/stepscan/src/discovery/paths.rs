//! Glob expansion over a workspace directory tree.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::DiscoveryError;

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 2] = ["node_modules", "target"];

/// Compile a workspace-relative glob.
///
/// A leading `./` is ignored and `*` does not cross directory separators.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidGlob`] when `pattern` is not a valid
/// glob.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, DiscoveryError> {
    let relative = pattern.strip_prefix("./").unwrap_or(pattern);
    GlobBuilder::new(relative)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| DiscoveryError::InvalidGlob {
            pattern: pattern.to_owned(),
            source,
        })
}

/// Find every file under `root` whose root-relative path matches `pattern`.
///
/// Hidden directories, `node_modules` and `target` are skipped. Results are
/// sorted.
///
/// # Errors
///
/// Returns [`DiscoveryError::MissingRoot`] when `root` is not a directory and
/// [`DiscoveryError::InvalidGlob`] when `pattern` is not a valid glob.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use stepscan::discovery::expand_glob;
///
/// let files = expand_glob(Path::new("."), "features/**/*.feature")?;
/// # Ok::<(), stepscan::error::DiscoveryError>(())
/// ```
pub fn expand_glob(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }
    let matcher = compile_glob(pattern)?;
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(|next| match next {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .is_ok_and(|relative| matcher.is_match(relative))
        })
        .map(DirEntry::into_path)
        .collect();
    files.sort();
    debug!(root = %root.display(), pattern, files = files.len(), "expanded glob");
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require explicit panic messages")]
mod tests {
    use std::fs;

    use super::*;
    use rstest::rstest;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, "").expect("write file");
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|file| {
                file.strip_prefix(root)
                    .expect("under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[rstest]
    #[case("**/*.js", vec!["lib/a.js", "steps/b.js", "steps/nested/c.js"])]
    #[case("./steps/*.js", vec!["steps/b.js"])]
    #[case("steps/**/*.js", vec!["steps/b.js", "steps/nested/c.js"])]
    #[case("**/*.feature", vec!["features/cats.feature"])]
    #[case("nothing/*.rb", vec![])]
    fn expands_relative_globs(#[case] pattern: &str, #[case] expected: Vec<&str>) {
        let dir = tempfile::tempdir().expect("temp dir");
        for file in [
            "lib/a.js",
            "steps/b.js",
            "steps/nested/c.js",
            "features/cats.feature",
            "node_modules/pkg/d.js",
            "target/e.js",
            ".git/f.js",
        ] {
            touch(dir.path(), file);
        }
        let files = expand_glob(dir.path(), pattern).expect("expand");
        assert_eq!(relative(dir.path(), &files), expected);
    }

    #[test]
    fn rejects_invalid_globs() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            expand_glob(dir.path(), "steps/[*.js"),
            Err(DiscoveryError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn rejects_missing_roots() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing");
        assert!(matches!(
            expand_glob(&missing, "**/*.js"),
            Err(DiscoveryError::MissingRoot(_))
        ));
    }
}
