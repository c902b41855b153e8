//! Normalise step templates into regular-expression sources.
//!
//! The template is tracked as a list of segments: text still owned by the
//! author, custom-parameter values, and fragments injected by a placeholder
//! stage. Placeholder stages rewrite author text and custom values; only
//! author text is escaped at the end. An injected `-?\d+` is never mistaken
//! for a placeholder or escaped a second time.

use std::sync::LazyLock;

use regex::Regex;

use crate::hint::builtin_parameter_pattern;

use super::CustomParameter;

static RUBY_INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\{.*?\}").unwrap_or_else(|_| unreachable!()));

static BUILTIN_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(float|int|stringInDoubleQuotes|string)\}").unwrap_or_else(|_| unreachable!())
});

const WILDCARD: &str = ".*";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Template(String),
    Custom(String),
    Injected(String),
}

impl Segment {
    /// Split into rewritable text and its kind, or hand back an injected
    /// fragment untouched.
    fn into_rewritable(self) -> Result<(String, bool), Self> {
        match self {
            Self::Template(text) => Ok((text, false)),
            Self::Custom(text) => Ok((text, true)),
            injected @ Self::Injected(_) => Err(injected),
        }
    }
}

/// Normalise a step template into a regular-expression source.
///
/// Stages run in a fixed order: custom parameters, Ruby `#{...}`
/// interpolation, built-in `{int}`-style placeholders, remaining `{name}`
/// placeholders, then escaping of the author text. Custom-parameter values
/// go through the placeholder stages but are never escaped. The result is
/// not anchored and is deterministic for a given input.
///
/// # Examples
/// ```
/// use stepscan_patterns::build_regex_from_template;
///
/// assert_eq!(build_regex_from_template("I have {int} cats", &[]), r"I have -?\d+ cats");
/// assert_eq!(build_regex_from_template("I see #{name}", &[]), "I see .*");
/// assert_eq!(build_regex_from_template("a/b {colour}", &[]), r"a\/b .*");
/// assert_eq!(build_regex_from_template(r"\d{2,4} items", &[]), r"\d{2,4} items");
/// ```
#[must_use]
pub fn build_regex_from_template(template: &str, custom: &[CustomParameter]) -> String {
    let mut segments = vec![Segment::Template(template.to_owned())];
    for param in custom {
        if param.parameter.is_empty() {
            continue;
        }
        segments = substitute_literal(segments, &param.parameter, &param.value);
    }
    segments = substitute_regex(segments, &RUBY_INTERPOLATION, |_| WILDCARD);
    segments = substitute_regex(segments, &BUILTIN_PLACEHOLDER, |name| {
        builtin_parameter_pattern(name).unwrap_or(WILDCARD)
    });
    segments = segments
        .into_iter()
        .flat_map(|segment| match segment.into_rewritable() {
            Ok((text, custom)) => replace_named_placeholders(&text, custom),
            Err(injected) => vec![injected],
        })
        .collect();

    let mut source = String::with_capacity(template.len().saturating_mul(2));
    for segment in &segments {
        match segment {
            Segment::Template(text) => escape_template_text(text, &mut source),
            Segment::Custom(text) | Segment::Injected(text) => source.push_str(text),
        }
    }
    source
}

fn substitute_literal(segments: Vec<Segment>, needle: &str, value: &str) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Template(text) = segment else {
            out.push(segment);
            continue;
        };
        let mut parts = text.split(needle);
        if let Some(first) = parts.next() {
            push_text(&mut out, first, false);
        }
        for part in parts {
            push_text(&mut out, value, true);
            push_text(&mut out, part, false);
        }
    }
    out
}

fn substitute_regex<'a>(
    segments: Vec<Segment>,
    pattern: &Regex,
    replacement: impl Fn(&str) -> &'a str,
) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let (text, custom) = match segment.into_rewritable() {
            Ok(rewritable) => rewritable,
            Err(injected) => {
                out.push(injected);
                continue;
            }
        };
        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else { continue };
            let name = caps.get(1).map_or("", |m| m.as_str());
            push_text(&mut out, text.get(last..whole.start()).unwrap_or_default(), custom);
            out.push(Segment::Injected(replacement(name).to_owned()));
            last = whole.end();
        }
        push_text(&mut out, text.get(last..).unwrap_or_default(), custom);
    }
    out
}

/// Replace `{name}` placeholders whose first inner character is neither a
/// digit nor a comma, unless the opening brace is escaped.
///
/// A placeholder at the very start of the text is replaced too.
fn replace_named_placeholders(text: &str, custom: bool) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut pending = String::new();
    let mut chars = text.char_indices().peekable();
    let mut previous: Option<char> = None;
    while let Some((index, ch)) = chars.next() {
        if ch == '{' && previous != Some('\\') {
            let rest = text.get(index + 1..).unwrap_or_default();
            let opens_placeholder = rest
                .chars()
                .next()
                .is_some_and(|first| !first.is_ascii_digit() && first != ',');
            if let (true, Some(close)) = (opens_placeholder, rest.find('}')) {
                push_text(&mut out, &std::mem::take(&mut pending), custom);
                out.push(Segment::Injected(WILDCARD.to_owned()));
                let end = index + 1 + close;
                while chars.next_if(|(i, _)| *i <= end).is_some() {}
                previous = Some('}');
                continue;
            }
        }
        pending.push(ch);
        previous = Some(ch);
    }
    push_text(&mut out, &pending, custom);
    out
}

fn push_text(out: &mut Vec<Segment>, text: &str, custom: bool) {
    if text.is_empty() {
        return;
    }
    out.push(if custom {
        Segment::Custom(text.to_owned())
    } else {
        Segment::Template(text.to_owned())
    });
}

/// Escape author text so it compiles while keeping authored regex syntax.
///
/// Forward slashes are escaped, braces are escaped unless they form a
/// `{n}`, `{n,}` or `{n,m}` repetition, and a dangling trailing backslash
/// is doubled. Existing escapes pass through untouched.
fn escape_template_text(text: &str, out: &mut String) {
    let mut chars = text.char_indices();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push_str(r"\\"),
            },
            '/' => out.push_str(r"\/"),
            '{' => {
                let rest = text.get(index..).unwrap_or_default();
                match quantifier_len(rest) {
                    Some(len) if !out.is_empty() => {
                        out.push_str(rest.get(..len).unwrap_or_default());
                        // Quantifiers are ASCII, so one char per byte.
                        for _ in 1..len {
                            chars.next();
                        }
                    }
                    _ => out.push_str(r"\{"),
                }
            }
            '}' => out.push_str(r"\}"),
            _ => out.push(ch),
        }
    }
}

/// Length in bytes of a repetition quantifier at the start of `text`.
fn quantifier_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut pos = 1;
    let digits_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }
    if bytes.get(pos) == Some(&b',') {
        pos += 1;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
    }
    (bytes.get(pos) == Some(&b'}')).then_some(pos + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn param(parameter: &str, value: &str) -> CustomParameter {
        CustomParameter {
            parameter: parameter.to_owned(),
            value: value.to_owned(),
        }
    }

    #[rstest]
    #[case("I have {int} cats", r"I have -?\d+ cats")]
    #[case("it costs {float}", r"it costs -?\d*\.?\d+")]
    #[case("I say {string}", r#"I say "[^"]+""#)]
    #[case("I say {stringInDoubleQuotes}", r#"I say "[^"]+""#)]
    #[case("I pick {colour} paint", "I pick .* paint")]
    #[case("{actor} logs in", ".* logs in")]
    #[case(r"I keep \{literal}", r"I keep \{literal\}")]
    #[case("hello #{name}!", "hello .*!")]
    #[case(r"^I have (\d+) cats$", r"^I have (\d+) cats$")]
    #[case(r"a\d{2,4}b", r"a\d{2,4}b")]
    #[case(r"a\d{3}b", r"a\d{3}b")]
    #[case("x{,2}", r"x\{,2\}")]
    #[case("path a/b", r"path a\/b")]
    #[case(r"already \/ escaped", r"already \/ escaped")]
    #[case(r"ends with \", r"ends with \\")]
    #[case("{2} start", r"\{2\} start")]
    fn normalises_templates(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(build_regex_from_template(template, &[]), expected);
    }

    #[test]
    fn applies_custom_parameters_in_order() {
        let custom = [param("${dog}", "(rex|fido)"), param("fido", "nope")];
        assert_eq!(
            build_regex_from_template("I walk ${dog}", &custom),
            "I walk (rex|fido)"
        );
    }

    #[rstest]
    #[case::builtin("count <n>", "<n>", "{int}", r"count -?\d+")]
    #[case::builtin_float(
        "I pay {amount} euro",
        "{amount}",
        "{float}",
        r"I pay -?\d*\.?\d+ euro"
    )]
    #[case::named("I see <x>", "<x>", "{thing}", "I see .*")]
    #[case::interpolation("I see <x>", "<x>", "#{thing}", "I see .*")]
    #[case::unescaped_value("a <p> b", "<p>", r"x/\d{2}", r"a x/\d{2} b")]
    fn custom_values_pass_through_placeholder_stages(
        #[case] template: &str,
        #[case] parameter: &str,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        let custom = [param(parameter, value)];
        assert_eq!(build_regex_from_template(template, &custom), expected);
    }

    #[test]
    fn skips_empty_custom_parameter() {
        let custom = [param("", "x")];
        assert_eq!(build_regex_from_template("abc", &custom), "abc");
    }

    #[test]
    fn replaces_adjacent_placeholders() {
        assert_eq!(build_regex_from_template("{a}{b}", &[]), ".*.*");
    }

    #[test]
    fn normalisation_is_deterministic() {
        let template = "I have {int} (red|blue) #{x} {thing}/s";
        let first = build_regex_from_template(template, &[]);
        let second = build_regex_from_template(template, &[]);
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("{3}", Some(3))]
    #[case("{3,}", Some(4))]
    #[case("{3,10} tail", Some(6))]
    #[case("{,3}", None)]
    #[case("{a}", None)]
    #[case("{3", None)]
    fn measures_quantifiers(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(quantifier_len(text), expected);
    }
}
