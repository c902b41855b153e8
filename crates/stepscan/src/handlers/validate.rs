//! Diagnostics for specification lines with no matching step.

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::indexing::StepIndex;
use crate::resolve::resolve_line;
use crate::util::utf16_len;

/// Value of [`Diagnostic::source`] for diagnostics raised by this crate.
pub const DIAGNOSTIC_SOURCE: &str = "stepscan";

/// Validate one specification line.
///
/// Trailing whitespace is ignored. Lines that are not step lines and lines
/// whose step text resolves produce no diagnostic. An unresolved step line
/// produces a warning covering the step text.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use stepscan::handlers::validate;
/// use stepscan::indexing::{IndexOptions, StepIndex};
///
/// let mut index = StepIndex::default();
/// index.add_source(&PathBuf::from("steps.js"), "Given('I have {int} dogs', fn);", &IndexOptions::default());
///
/// let Some(diagnostic) = validate(&index, "  Given I have 3 cats  ", 4, "") else {
///     panic!("expected a diagnostic");
/// };
/// assert_eq!(diagnostic.range.start.character, 8);
/// assert_eq!(diagnostic.range.end.character, 21);
/// assert_eq!(diagnostic.message, r#"Was unable to find step for "Given I have 3 cats""#);
/// ```
#[must_use]
pub fn validate(
    index: &StepIndex,
    line: &str,
    line_number: u32,
    document: &str,
) -> Option<Diagnostic> {
    let line = line.trim_end();
    let matched = resolve_line(index, line, document)?;
    if index.find_by_text(&matched.text).is_some() {
        return None;
    }
    Some(Diagnostic {
        range: Range::new(
            Position::new(line_number, matched.text_column()),
            Position::new(line_number, utf16_len(line)),
        ),
        severity: Some(DiagnosticSeverity::WARNING),
        source: Some(DIAGNOSTIC_SOURCE.to_owned()),
        message: format!("Was unable to find step for \"{}\"", line.trim_start()),
        ..Diagnostic::default()
    })
}

/// Validate every line of a document, in line order.
#[must_use]
pub fn validate_document(index: &StepIndex, document: &str) -> Vec<Diagnostic> {
    (0u32..)
        .zip(document.lines())
        .filter_map(|(line_number, line)| validate(index, line, line_number, document))
        .collect()
}
