//! Definition lookup for specification lines.

use tracing::debug;

use crate::indexing::{StepIndex, StepLocation};
use crate::resolve::find_step;

/// Return the declaration site of the step a specification line invokes.
///
/// Returns `None` when the line is not a step line or no entry matches.
/// Use [`StepLocation::to_lsp_location`] to convert the result for an
/// editor.
#[must_use]
pub fn resolve_definition(index: &StepIndex, line: &str, document: &str) -> Option<StepLocation> {
    let Some(entry) = find_step(index, line, document) else {
        debug!(line, "no step definition for line");
        return None;
    };
    Some(entry.location.clone())
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require explicit panic messages")]
mod tests {
    use std::path::PathBuf;

    use lsp_types::Position;

    use super::*;
    use crate::indexing::IndexOptions;

    #[test]
    fn returns_the_first_matching_declaration() {
        let mut index = StepIndex::default();
        let opts = IndexOptions::default();
        index.add_source(&PathBuf::from("a.js"), "\n\nWhen('I feed {int} cats', fn);", &opts);
        index.add_source(&PathBuf::from("b.js"), "When('I feed (.*)', fn);", &opts);

        let location = resolve_definition(&index, "  When I feed 2 cats", "").expect("definition");
        assert_eq!(location.path, PathBuf::from("a.js"));
        assert_eq!(location.position, Position::new(2, 6));

        let location = resolve_definition(&index, "When I feed the dog", "").expect("definition");
        assert_eq!(location.path, PathBuf::from("b.js"));
    }

    #[test]
    fn ignores_unmatched_and_non_step_lines() {
        let index = StepIndex::default();
        assert!(resolve_definition(&index, "Given anything", "").is_none());
        assert!(resolve_definition(&index, "Feature: nothing", "").is_none());
    }
}
