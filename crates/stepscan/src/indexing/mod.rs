//! Step-definition indexing.
//!
//! Declaration files are scanned with one heuristic recognition pattern (see
//! [`extract_declarations`]). Each declaration body is normalised by
//! `stepscan-patterns` into a full matcher and a partial matcher, optionally
//! after expanding `(a|b)` alternation groups, and the resulting
//! [`StepEntry`] values are collected into a [`StepIndex`] keyed by a hash of
//! their display text.

use std::path::PathBuf;

use lsp_types::{Location, Position, Range, Url};
use regex::Regex;
use sha2::{Digest, Sha256};
use stepscan_patterns::{CustomParameter, StepKeyword};

mod comments;
mod extractor;
mod registry;

pub use comments::{DocComment, strip_comments};
pub use extractor::{StepDeclaration, extract_declarations, extract_steps};
pub use registry::StepIndex;

/// Options shared by indexing and the request handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Expand `(a|b)` groups into one entry per alternative.
    pub steps_invariants: bool,
    /// Turn parameter-shaped fragments of insert texts into tab stops.
    pub smart_snippets: bool,
    /// Literal substitutions applied before normalisation.
    pub custom_parameters: Vec<CustomParameter>,
    /// Only offer completions whose keyword category matches the line.
    pub strict_gherkin_completion: bool,
}

/// Where a step body was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLocation {
    /// Path of the declaration file.
    pub path: PathBuf,
    /// 0-based line and UTF-16 column of the first body character.
    pub position: Position,
}

impl StepLocation {
    /// Convert into an editor location with an empty range at the body start.
    ///
    /// Returns `None` when the path cannot be expressed as a `file:` URI, for
    /// example when it is relative.
    #[must_use]
    pub fn to_lsp_location(&self) -> Option<Location> {
        let uri = Url::from_file_path(&self.path).ok()?;
        Some(Location {
            uri,
            range: Range::new(self.position, self.position),
        })
    }
}

/// One indexed, matchable step.
#[derive(Debug, Clone)]
pub struct StepEntry {
    /// Stable identifier derived from [`display_text`](Self::display_text).
    pub identity: String,
    /// Matcher for full specification text.
    pub match_pattern: Regex,
    /// Matcher accepting prefixes of text the full matcher accepts.
    pub partial_pattern: Regex,
    /// Template with backslashes and outer anchors removed.
    pub display_text: String,
    /// The declaration as written, without any function body.
    pub source_text: String,
    /// Declaration site of the step body.
    pub location: StepLocation,
    /// Number of confirmed uses; drives completion ranking.
    pub usage_count: u32,
    /// Keyword spelling found in the declaration.
    pub keyword: String,
    /// Semantic category of [`keyword`](Self::keyword).
    pub category: StepKeyword,
    /// Description taken from the doc comment or the function name.
    pub documentation: String,
}

/// Compute the identity of a step from its display text.
///
/// # Examples
///
/// ```
/// use stepscan::indexing::step_identity;
///
/// let id = step_identity("I have {int} cats");
/// assert!(id.starts_with("step"));
/// assert_eq!(id.len(), 4 + 64);
/// assert_eq!(id, step_identity("I have {int} cats"));
/// ```
#[must_use]
pub fn step_identity(display_text: &str) -> String {
    format!("step{:x}", Sha256::digest(display_text.as_bytes()))
}
