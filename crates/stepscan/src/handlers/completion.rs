//! Completion candidates for partially typed specification lines.

use std::sync::LazyLock;

use lsp_types::{CompletionItem, CompletionItemKind, Documentation, InsertTextFormat};
use regex::Regex;
use serde::Serialize;
use stepscan_patterns::{StepKeyword, completion_insert_text};

use crate::indexing::{IndexOptions, StepEntry, StepIndex};
use crate::resolve::{GherkinLine, match_gherkin_line, resolve_line};

static LAST_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\s]+$").unwrap_or_else(|_| unreachable!()));

/// Usage counts at or above this value sort together.
const MAX_RANKED_USAGE: u32 = 99_999;

/// One completion offered for a specification line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionCandidate {
    /// Display text of the step.
    pub label: String,
    /// Snippet text inserted after what has already been typed.
    pub insert_text: String,
    /// Documentation taken from the declaration.
    pub documentation: String,
    /// Key ordering candidates by descending usage, then label.
    pub sort_key: String,
    /// Identity of the entry, passed back to
    /// [`confirm_completion`](super::confirm_completion).
    pub identity: String,
}

impl From<CompletionCandidate> for CompletionItem {
    fn from(candidate: CompletionCandidate) -> Self {
        Self {
            label: candidate.label,
            kind: Some(CompletionItemKind::SNIPPET),
            documentation: (!candidate.documentation.is_empty())
                .then_some(Documentation::String(candidate.documentation)),
            sort_text: Some(candidate.sort_key),
            insert_text: Some(candidate.insert_text),
            insert_text_format: Some(InsertTextFormat::SNIPPET),
            data: Some(serde_json::Value::String(candidate.identity)),
            ..Self::default()
        }
    }
}

/// Sort key for a step with `usage_count` uses.
///
/// More frequently used steps sort first; ties fall back to the display
/// text.
///
/// # Examples
///
/// ```
/// use stepscan::handlers::sort_key;
///
/// assert_eq!(sort_key(0, "a step"), "99999_a step");
/// assert_eq!(sort_key(12, "a step"), "99987_a step");
/// assert!(sort_key(2, "b") < sort_key(1, "a"));
/// ```
#[must_use]
pub fn sort_key(usage_count: u32, display_text: &str) -> String {
    let rank = MAX_RANKED_USAGE - usage_count.min(MAX_RANKED_USAGE);
    format!("{rank:05}_{display_text}")
}

/// Offer completions for a specification line.
///
/// The final, possibly incomplete, word of the step text is ignored and the
/// rest is matched against each entry's partial pattern. With
/// `strict_gherkin_completion`, entries must also share the line's keyword
/// category; see [`StepKeyword::resolve`] for how `And` and `But` lines are
/// categorised. Candidates are returned sorted by [`sort_key`].
///
/// Returns `None` for non-step lines and when nothing matches.
#[must_use]
pub fn complete(
    index: &StepIndex,
    options: &IndexOptions,
    line: &str,
    line_number: u32,
    document: &str,
) -> Option<Vec<CompletionCandidate>> {
    let matched = resolve_line(index, line, document)?;
    let typed = LAST_WORD.replace(&matched.text, "");
    let category = options
        .strict_gherkin_completion
        .then(|| line_category(&matched, line_number, document));

    let mut candidates: Vec<CompletionCandidate> = index
        .entries()
        .iter()
        .filter(|entry| category.is_none_or(|allowed| category_allows(allowed, entry)))
        .filter(|entry| entry.partial_pattern.is_match(&typed))
        .map(|entry| CompletionCandidate {
            label: entry.display_text.clone(),
            insert_text: completion_insert_text(&entry.display_text, &typed, options.smart_snippets),
            documentation: entry.documentation.clone(),
            sort_key: sort_key(entry.usage_count, &entry.display_text),
            identity: entry.identity.clone(),
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    Some(candidates)
}

fn category_allows(allowed: Option<StepKeyword>, entry: &StepEntry) -> bool {
    allowed.is_some_and(|keyword| entry.category == keyword || entry.category == StepKeyword::Step)
}

/// Category a line's keyword stands for, resolving continuations against the
/// nearest earlier primary keyword in the document.
fn line_category(matched: &GherkinLine, line_number: u32, document: &str) -> Option<StepKeyword> {
    let keyword = matched.category()?;
    if !keyword.is_conjunction() {
        return Some(keyword);
    }
    let earlier = usize::try_from(line_number).unwrap_or(usize::MAX);
    let lines: Vec<&str> = document.lines().take(earlier).collect();
    let previous = lines.iter().rev().find_map(|line| {
        match_gherkin_line(line)
            .and_then(|found| found.category())
            .filter(|category| category.is_primary())
    });
    keyword.resolve(previous)
}
