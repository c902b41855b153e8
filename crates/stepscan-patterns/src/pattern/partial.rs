//! Prefix-tolerant patterns used to filter completion candidates.

use super::CustomParameter;
use super::normalize::build_regex_from_template;

/// Split text on spaces, keeping parenthesised groups intact.
///
/// Only nesting depth is tracked, so an unbalanced group swallows the rest of
/// the text into one part. Escaped characters never open or close a group.
///
/// # Examples
/// ```
/// use stepscan_patterns::split_pattern_parts;
///
/// assert_eq!(
///     split_pattern_parts("I pick (red|dark blue) paint"),
///     vec!["I", "pick", "(red|dark blue)", "paint"]
/// );
/// ```
#[must_use]
pub fn split_pattern_parts(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                current.push(ch);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ' ' if depth == 0 => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
}

/// Build the partial-match regex source for a step template.
///
/// Each space-separated part of the normalised source becomes `(part|$)` and
/// the parts are joined with `( |$)`, so any prefix ending at a part boundary
/// is accepted.
///
/// # Examples
/// ```
/// use stepscan_patterns::build_partial_regex;
///
/// assert_eq!(
///     build_partial_regex("I have {int} cats", &[]),
///     r"^(I|$)( |$)(have|$)( |$)(-?\d+|$)( |$)(cats|$)"
/// );
/// ```
#[must_use]
pub fn build_partial_regex(template: &str, custom: &[CustomParameter]) -> String {
    let source = build_regex_from_template(template, custom);
    let body = split_pattern_parts(&source)
        .iter()
        .map(|part| format!("({part}|$)"))
        .collect::<Vec<_>>()
        .join("( |$)");
    format!("^{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("one two", vec!["one", "two"])]
    #[case("a (b c) d", vec!["a", "(b c)", "d"])]
    #[case("a ((b c) d) e", vec!["a", "((b c) d)", "e"])]
    #[case(r"a \( b", vec!["a", r"\(", "b"])]
    #[case("a  b", vec!["a", "", "b"])]
    #[case("a (b c", vec!["a", "(b c"])]
    #[case("", vec![""])]
    fn splits_on_top_level_spaces(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_pattern_parts(text), expected);
    }

    #[test]
    fn keeps_leading_anchor_inside_first_part() {
        assert_eq!(build_partial_regex("^go$", &[]), "^(^go$|$)");
    }
}
