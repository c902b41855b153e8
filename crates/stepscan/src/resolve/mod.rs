//! Resolution of specification lines against a step index.
//!
//! A line is a step line when it starts with a Gherkin step keyword followed
//! by whitespace. Scenario outline placeholders are substituted before the
//! step text is looked up; see [`resolve_line`].

use std::sync::LazyLock;

use regex::Regex;
use stepscan_patterns::{GHERKIN_KEYWORDS, StepKeyword, keyword_alternation};

use crate::indexing::{StepEntry, StepIndex};
use crate::util::utf16_len;

mod outline;

pub use outline::{has_placeholders, outline_values, substitute_placeholders};

static GHERKIN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^(\s*)({})(\s+)(.*)",
        keyword_alternation(GHERKIN_KEYWORDS)
    );
    Regex::new(&pattern).unwrap_or_else(|_| unreachable!())
});

/// A specification line split into its step parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GherkinLine {
    /// Leading whitespace.
    pub indent: String,
    /// Keyword spelling as written.
    pub keyword: String,
    /// Whitespace between the keyword and the step text.
    pub separator: String,
    /// Everything after the separator.
    pub text: String,
}

impl GherkinLine {
    /// Semantic category of the keyword.
    #[must_use]
    pub fn category(&self) -> Option<StepKeyword> {
        StepKeyword::classify(&self.keyword)
    }

    /// UTF-16 column at which the step text starts.
    #[must_use]
    pub fn text_column(&self) -> u32 {
        utf16_len(&self.indent) + utf16_len(&self.keyword) + utf16_len(&self.separator)
    }
}

/// Split `line` into indentation, keyword, separator and step text.
///
/// Keywords are matched case-sensitively and must be followed by
/// whitespace.
///
/// # Examples
///
/// ```
/// use stepscan::resolve::match_gherkin_line;
///
/// let Some(line) = match_gherkin_line("  Given I have 3 cats") else {
///     panic!("step line expected");
/// };
/// assert_eq!(line.keyword, "Given");
/// assert_eq!(line.text, "I have 3 cats");
/// assert_eq!(line.text_column(), 8);
/// assert!(match_gherkin_line("  Scenario: cats").is_none());
/// ```
#[must_use]
pub fn match_gherkin_line(line: &str) -> Option<GherkinLine> {
    let caps = GHERKIN_LINE.captures(line)?;
    let part = |index: usize| {
        caps.get(index)
            .map(|m| m.as_str().to_owned())
            .unwrap_or_default()
    };
    Some(GherkinLine {
        indent: part(1),
        keyword: part(2),
        separator: part(3),
        text: part(4),
    })
}

/// Match `line` as a step line, substituting outline placeholders first.
///
/// When the line has placeholders, two substitutions are tried: one with
/// values inserted as-is and one with values wrapped in double quotes. The
/// quoted form is used when its step text resolves to an indexed entry;
/// otherwise the bare form is returned whether or not it resolves.
#[must_use]
pub fn resolve_line(index: &StepIndex, line: &str, document: &str) -> Option<GherkinLine> {
    if !has_placeholders(line) {
        return match_gherkin_line(line);
    }
    let values = outline_values(document);
    let quoted = match_gherkin_line(&substitute_placeholders(line, &values, true));
    if quoted
        .as_ref()
        .is_some_and(|line| !line.text.is_empty() && index.find_by_text(&line.text).is_some())
    {
        return quoted;
    }
    match_gherkin_line(&substitute_placeholders(line, &values, false))
}

/// Find the entry a specification line refers to.
///
/// Lookup is first-match-wins over the index in discovery order.
#[must_use]
pub fn find_step<'a>(index: &'a StepIndex, line: &str, document: &str) -> Option<&'a StepEntry> {
    let matched = resolve_line(index, line, document)?;
    index.find_by_text(&matched.text)
}
