//! Step-template normalisation and compilation helpers.

mod normalize;
mod partial;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::PatternError;

pub use normalize::build_regex_from_template;
pub use partial::{build_partial_regex, split_pattern_parts};

/// User-configured literal substitution applied before any other stage.
///
/// Every occurrence of `parameter` in a template is replaced by `value`,
/// which is inserted into the regex source verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomParameter {
    /// Literal text to look for in step templates.
    pub parameter: String,
    /// Regex fragment substituted for each occurrence.
    pub value: String,
}

/// A normalised template together with its compiled matcher.
#[derive(Debug, Clone)]
pub struct CompiledStepPattern {
    /// Regex source produced by [`build_regex_from_template`].
    pub source: String,
    /// Unanchored matcher compiled from `source`.
    pub regex: Regex,
}

/// Normalise and compile a step template.
///
/// # Errors
/// Returns [`PatternError::Regex`] when the normalised source is rejected by
/// the regex engine, for example on unbalanced groups or lookaround.
///
/// # Examples
/// ```
/// use stepscan_patterns::compile_step_pattern;
///
/// let Ok(compiled) = compile_step_pattern("I have {int} cats", &[]) else {
///     panic!("template should compile");
/// };
/// assert!(compiled.regex.is_match("I have -2 cats"));
/// assert!(!compiled.regex.is_match("I have three cats"));
/// ```
pub fn compile_step_pattern(
    template: &str,
    custom: &[CustomParameter],
) -> Result<CompiledStepPattern, PatternError> {
    let source = build_regex_from_template(template, custom);
    let regex = Regex::new(&source).map_err(|err| PatternError::regex(&source, err))?;
    Ok(CompiledStepPattern { source, regex })
}

/// Compile the partial matcher for a template, reusing `full` on failure.
///
/// # Examples
/// ```
/// use stepscan_patterns::{compile_partial_pattern, compile_step_pattern};
///
/// let Ok(full) = compile_step_pattern("I have {int} cats", &[]) else {
///     panic!("template should compile");
/// };
/// let partial = compile_partial_pattern("I have {int} cats", &[], &full.regex);
/// assert!(partial.is_match("I have "));
/// ```
#[must_use]
pub fn compile_partial_pattern(template: &str, custom: &[CustomParameter], full: &Regex) -> Regex {
    let source = build_partial_regex(template, custom);
    Regex::new(&source).unwrap_or_else(|_| full.clone())
}

/// Human-readable form of a template.
///
/// Every backslash is removed, then one leading `^` and one trailing `$`.
///
/// # Examples
/// ```
/// use stepscan_patterns::display_text;
///
/// assert_eq!(display_text(r"^I have (\d+) cats$"), "I have (d+) cats");
/// assert_eq!(display_text("I have {int} cats"), "I have {int} cats");
/// ```
#[must_use]
pub fn display_text(template: &str) -> String {
    let unescaped = template.replace('\\', "");
    let text = unescaped.strip_prefix('^').unwrap_or(&unescaped);
    let text = text.strip_suffix('$').unwrap_or(text);
    text.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I have {int} cats", "I have 3 cats", true)]
    #[case("I have {int} cats", "I have -2 cats", true)]
    #[case("I have {int} cats", "I have three cats", false)]
    #[case("it costs {float}", "it costs .5", true)]
    #[case("I say {string}", r#"I say "hi""#, true)]
    #[case("I say {string}", "I say hi", false)]
    #[case("I open a/b", "I open a/b", true)]
    #[case(r"^I have (\d+) apples$", "I have 12 apples", true)]
    #[case(r"^I have (\d+) apples$", "I have 12 apples today", false)]
    #[case("I am {name}", "I am anybody", true)]
    fn compiled_patterns_match(#[case] template: &str, #[case] text: &str, #[case] expected: bool) {
        let Ok(compiled) = compile_step_pattern(template, &[]) else {
            panic!("{template} should compile");
        };
        assert_eq!(compiled.regex.is_match(text), expected, "{template} vs {text}");
    }

    #[rstest]
    #[case("I am (unbalanced")]
    #[case("I (?=look) ahead")]
    #[case("* starts with repetition")]
    fn rejects_unsupported_sources(#[case] template: &str) {
        assert!(matches!(
            compile_step_pattern(template, &[]),
            Err(PatternError::Regex { .. })
        ));
    }

    #[rstest]
    #[case("I have ")]
    #[case("I have 3 ")]
    #[case("I have 3 cats")]
    #[case("I ")]
    #[case("")]
    fn partial_accepts_token_boundary_prefixes(#[case] prefix: &str) {
        let Ok(full) = compile_step_pattern("I have {int} cats", &[]) else {
            panic!("template should compile");
        };
        let partial = compile_partial_pattern("I have {int} cats", &[], &full.regex);
        assert!(partial.is_match(prefix), "prefix {prefix:?}");
    }

    #[test]
    fn partial_rejects_diverging_prefix() {
        let Ok(full) = compile_step_pattern("I have {int} cats", &[]) else {
            panic!("template should compile");
        };
        let partial = compile_partial_pattern("I have {int} cats", &[], &full.regex);
        assert!(!partial.is_match("You have "));
        assert!(!partial.is_match("I have many "));
    }

    #[test]
    fn partial_falls_back_to_full_pattern() {
        let Ok(full) = Regex::new("fallback") else {
            panic!("literal regex should compile");
        };
        let partial = compile_partial_pattern("I (a b", &[], &full);
        assert_eq!(partial.as_str(), "fallback");
    }

    #[rstest]
    #[case(r"^I have (\d+) cats$", r"I have (d+) cats")]
    #[case("^^start", "^start")]
    #[case("end$$", "end$")]
    #[case(r"a\/b", "a/b")]
    fn derives_display_text(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(display_text(template), expected);
    }
}
