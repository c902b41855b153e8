//! Built-in Cucumber-expression parameter types.

/// Translate a built-in parameter placeholder name into a regex fragment.
///
/// Only the fixed built-in set is understood. Any other `{name}` placeholder
/// is handled later in the pipeline as a plain wildcard.
///
/// # Examples
/// ```
/// use stepscan_patterns::builtin_parameter_pattern;
///
/// assert_eq!(builtin_parameter_pattern("int"), Some(r"-?\d+"));
/// assert_eq!(builtin_parameter_pattern("string"), Some(r#""[^"]+""#));
/// assert_eq!(builtin_parameter_pattern("colour"), None);
/// ```
#[must_use]
pub fn builtin_parameter_pattern(name: &str) -> Option<&'static str> {
    match name {
        "float" => Some(r"-?\d*\.?\d+"),
        "int" => Some(r"-?\d+"),
        "stringInDoubleQuotes" | "string" => Some(r#""[^"]+""#),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("float", r"-?\d*\.?\d+")]
    #[case("int", r"-?\d+")]
    #[case("string", r#""[^"]+""#)]
    #[case("stringInDoubleQuotes", r#""[^"]+""#)]
    fn maps_builtin_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(builtin_parameter_pattern(name), Some(expected));
    }

    #[test]
    fn ignores_unknown_and_case_variants() {
        assert_eq!(builtin_parameter_pattern("Int"), None);
        assert_eq!(builtin_parameter_pattern("word"), None);
    }
}
