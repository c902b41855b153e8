//! Completion insert-text construction.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::pattern::split_pattern_parts;

/// Parameter-shaped fragments turned into tab stops: a wildcard, class or
/// escape followed by a repetition, optionally wrapped in a group, or a
/// Cucumber `{name}` placeholder.
static SNIPPET_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?(?:\\.|\.|\[[^\]]+\])(?:\*|\+|\{[^}]+\})\)?|\{[^{}\s]*\}")
        .unwrap_or_else(|_| unreachable!())
});

/// Build the text inserted when a completion candidate is accepted.
///
/// `display` is split into parts with [`split_pattern_parts`]. Parts are
/// accumulated left to right and the first accumulated prefix that `typed`
/// does not start with marks the insertion point; that part and everything
/// after it are returned. When every prefix is already typed the whole
/// display text is returned. With `smart_snippets` each parameter-shaped
/// fragment becomes a numbered `${n:}` tab stop.
///
/// # Examples
/// ```
/// use stepscan_patterns::completion_insert_text;
///
/// assert_eq!(
///     completion_insert_text("I have {int} cats", "I have ", false),
///     "{int} cats"
/// );
/// assert_eq!(
///     completion_insert_text("I have {int} cats", "I have ", true),
///     "${1:} cats"
/// );
/// assert_eq!(
///     completion_insert_text("I see (.*) and (.*)", "I see ", true),
///     "${1:} and ${2:}"
/// );
/// assert_eq!(
///     completion_insert_text("I see (.*) and (.*)", "", true),
///     "I see ${1:} and ${2:}"
/// );
/// ```
#[must_use]
pub fn completion_insert_text(display: &str, typed: &str, smart_snippets: bool) -> String {
    let parts = split_pattern_parts(display);
    let mut prefix = String::new();
    let mut remainder = display.to_owned();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            prefix.push(' ');
        }
        prefix.push_str(part);
        if !typed.starts_with(&prefix) {
            remainder = parts.get(index..).unwrap_or_default().join(" ");
            break;
        }
    }

    if !smart_snippets {
        return remainder;
    }
    let mut slot = 0usize;
    SNIPPET_SLOT
        .replace_all(&remainder, |_: &Captures<'_>| {
            slot += 1;
            format!("${{{slot}:}}")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I have {int} cats", "", "I have {int} cats")]
    #[case("I have {int} cats", "I ", "have {int} cats")]
    #[case("I have {int} cats", "I have 3 ", "{int} cats")]
    #[case("I have {int} cats", "I have {int} ", "cats")]
    #[case("I have {int} cats", "I have {int} cats ", "I have {int} cats")]
    #[case("I pick (red|dark blue) paint", "I pick ", "(red|dark blue) paint")]
    #[case("I have many cats", "I hav", "have many cats")]
    fn trims_typed_prefix(#[case] display: &str, #[case] typed: &str, #[case] expected: &str) {
        assert_eq!(completion_insert_text(display, typed, false), expected);
    }

    #[rstest]
    #[case("I type (.*) here", "I type ${1:} here")]
    #[case("a [a-z]+ b .{2,4}", "a ${1:} b ${2:}")]
    #[case("it is {colour} and {int}", "it is ${1:} and ${2:}")]
    #[case("plain words", "plain words")]
    fn numbers_snippet_slots(#[case] display: &str, #[case] expected: &str) {
        assert_eq!(completion_insert_text(display, "", true), expected);
    }

    #[rstest]
    #[case("", "I see ${1:} and ${2:}")]
    #[case("I see ", "${1:} and ${2:}")]
    fn numbers_slots_after_typed_prefix(#[case] typed: &str, #[case] expected: &str) {
        assert_eq!(completion_insert_text("I see (.*) and (.*)", typed, true), expected);
    }
}
