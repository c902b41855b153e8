//! Heuristic extraction of step declarations from arbitrary source text.
//!
//! No source language is parsed. A single case-insensitive, multi-line
//! recognition pattern looks for a step keyword (in any supported Gherkin
//! dialect, or one of the generic `defineStep`/`Step`/`StepDefinition`
//! markers) followed by a quoted or slash-delimited body. Matches that only
//! exist inside comments are discarded by re-running the pattern over the
//! match with its comments stripped.

use std::path::Path;
use std::sync::LazyLock;

use lsp_types::Position;
use regex::{Captures, Regex, RegexBuilder};
use stepscan_patterns::{
    GENERIC_STEP_MARKERS, GHERKIN_KEYWORDS, PatternError, StepKeyword, compile_partial_pattern,
    compile_step_pattern, display_text, expand_variants, keyword_alternation,
};
use tracing::debug;

use super::comments::{DocComment, strip_comments};
use super::{IndexOptions, StepEntry, StepLocation, step_identity};
use crate::util::byte_offset_to_position;

/// Optional `/** ... */` block directly above a declaration.
const DOC_COMMENT: &str = r"(?s:(?P<doc>/\*\*.+?\*/\s*))?";
/// Optional unterminated block comment, so that commented-out declarations
/// are matched and then rejected by validation.
const OPEN_COMMENT: &str = r"(?s:/\*.+?)?";
/// Anything without quotes or slashes, ending in a non-word character.
const LINE_PREFIX: &str = r#"^(?:[^'"/]*?[^\w])?"#;
/// Punctuation between the keyword and the opening delimiter.
const KEYWORD_GAP: &str = r#"[^/'"`\w]*?"#;
/// One alternative per delimiter, each with its own body group.
const DELIMITED_BODY: &str = concat!(
    r"(?:/(?P<slash>(?:[^/\\\n]|\\.)+)/",
    r"|'(?P<single>(?:[^'\\\n]|\\.)+)'",
    r#"|"(?P<double>(?:[^"\\\n]|\\.)+)""#,
    r"|`(?P<backtick>(?:[^`\\\n]|\\.)+)`)",
);
/// Regex flags after a slash body, then the end of the argument.
const BODY_END: &str = r"[igm]* *(?:\)|,|;|$)";
/// Optional options object, `async`, `function name` and parameter list.
const FUNCTION_TAIL: &str =
    r"(?: *(?:\s*\{.+\} *,)?\s*(?:(?:async )?(?:function ?(?P<function>[^(]+)?)?)? ?\([^)]+\))?";

const BODY_GROUPS: [&str; 4] = ["slash", "single", "double", "backtick"];

static STEP_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&declaration_pattern())
        .case_insensitive(true)
        .multi_line(true)
        .crlf(true)
        .size_limit(64 * (1 << 20))
        .build()
        .unwrap_or_else(|_| unreachable!())
});

fn declaration_pattern() -> String {
    let keywords = [
        keyword_alternation(GHERKIN_KEYWORDS),
        keyword_alternation(GENERIC_STEP_MARKERS),
    ]
    .join("|");
    [
        DOC_COMMENT,
        OPEN_COMMENT,
        LINE_PREFIX,
        "(?P<keyword>",
        &keywords,
        ")",
        KEYWORD_GAP,
        DELIMITED_BODY,
        BODY_END,
        FUNCTION_TAIL,
    ]
    .concat()
}

/// A step declaration found in a source file, before normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDeclaration {
    /// Keyword spelling as written.
    pub keyword: String,
    /// Semantic category of the keyword.
    pub category: StepKeyword,
    /// Text between the delimiters.
    pub body: String,
    /// Name of the declaring function, when one was captured.
    pub function_name: Option<String>,
    /// Documentation chosen from the doc comment or function name.
    pub documentation: String,
    /// Declaration text up to, but excluding, any function body.
    pub source_text: String,
    /// 0-based line and UTF-16 column of the first body character.
    pub position: Position,
}

/// Find every live step declaration in `source`, in source order.
///
/// # Examples
///
/// ```
/// use stepscan::indexing::extract_declarations;
///
/// let source = "/* Given('old step', fn) */\nWhen(/^I press (\\w+)$/, function press(key) {\n});";
/// let found = extract_declarations(source);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].body, r"^I press (\w+)$");
/// assert_eq!(found[0].documentation, "press");
/// assert_eq!((found[0].position.line, found[0].position.character), (1, 6));
/// ```
#[must_use]
pub fn extract_declarations(source: &str) -> Vec<StepDeclaration> {
    STEP_DECLARATION
        .captures_iter(source)
        .filter_map(|caps| declaration_from_captures(source, &caps))
        .collect()
}

fn declaration_from_captures(source: &str, caps: &Captures<'_>) -> Option<StepDeclaration> {
    let whole = caps.get(0)?;
    let body = BODY_GROUPS.iter().find_map(|name| caps.name(name))?;
    let keyword = caps.name("keyword")?;

    let mut validation = String::with_capacity(whole.len() + 2);
    validation.push_str(whole.as_str());
    validation.push_str("*/");
    if !STEP_DECLARATION.is_match(&strip_comments(&validation)) {
        debug!(body = body.as_str(), "skipping commented-out step declaration");
        return None;
    }

    let function_name = caps
        .name("function")
        .map(|m| m.as_str().trim().to_owned())
        .filter(|name| !name.is_empty());
    let documentation = caps
        .name("doc")
        .map(|doc| DocComment::parse(doc.as_str()))
        .unwrap_or_default()
        .documentation(function_name.as_deref());

    Some(StepDeclaration {
        keyword: keyword.as_str().to_owned(),
        category: StepKeyword::classify(keyword.as_str()).unwrap_or(StepKeyword::Step),
        body: body.as_str().to_owned(),
        function_name,
        documentation,
        source_text: source_text(source, keyword.start(), body.end(), whole.end()),
        position: byte_offset_to_position(source, body.start()),
    })
}

/// The declaration from the start of the keyword's line, cut at the first `{`
/// following the body.
fn source_text(source: &str, keyword_start: usize, body_end: usize, match_end: usize) -> String {
    let line_start = source
        .get(..keyword_start)
        .and_then(|before| before.rfind('\n'))
        .map_or(0, |newline| newline + 1);
    let tail_end = source
        .get(body_end..match_end)
        .and_then(|tail| tail.find('{'))
        .map_or(match_end, |brace| body_end + brace);
    source
        .get(line_start..tail_end)
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// Extract and compile the steps declared in one file.
///
/// With `steps_invariants` each declaration body is expanded into its
/// alternation variants first. Templates that fail to compile are dropped
/// and logged at `debug`.
#[must_use]
pub fn extract_steps(path: &Path, source: &str, options: &IndexOptions) -> Vec<StepEntry> {
    let mut entries = Vec::new();
    for declaration in extract_declarations(source) {
        let templates = if options.steps_invariants {
            expand_variants(&declaration.body)
        } else {
            vec![declaration.body.clone()]
        };
        for template in templates {
            match build_entry(path, &declaration, &template, options) {
                Ok(entry) => entries.push(entry),
                Err(err) => debug!(
                    path = %path.display(),
                    %template,
                    error = %err,
                    "dropping step template that does not compile"
                ),
            }
        }
    }
    entries
}

fn build_entry(
    path: &Path,
    declaration: &StepDeclaration,
    template: &str,
    options: &IndexOptions,
) -> Result<StepEntry, PatternError> {
    let full = compile_step_pattern(template, &options.custom_parameters)?;
    let partial = compile_partial_pattern(template, &options.custom_parameters, &full.regex);
    let display = display_text(template);
    Ok(StepEntry {
        identity: step_identity(&display),
        match_pattern: full.regex,
        partial_pattern: partial,
        display_text: display,
        source_text: declaration.source_text.clone(),
        location: StepLocation {
            path: path.to_path_buf(),
            position: declaration.position,
        },
        usage_count: 0,
        keyword: declaration.keyword.clone(),
        category: declaration.category,
        documentation: declaration.documentation.clone(),
    })
}
