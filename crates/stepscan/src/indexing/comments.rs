//! Comment handling for declaration files.
//!
//! Two concerns live here: stripping comments so that commented-out
//! declarations can be told apart from live ones, and reading the
//! description out of a `/** ... */` block that precedes a declaration.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap_or_else(|_| unreachable!()));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?://|#).*$").unwrap_or_else(|_| unreachable!()));

/// Remove block comments and whole-line `//` or `#` comments.
///
/// Line comments are only recognised at the start of a line (after
/// indentation) so that URLs and `#{...}` interpolation inside string
/// literals survive.
///
/// # Examples
///
/// ```
/// use stepscan::indexing::strip_comments;
///
/// assert_eq!(strip_comments("a /* b */ c"), "a  c");
/// assert_eq!(strip_comments("  // gone\nkept('http://x')"), "\nkept('http://x')");
/// ```
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(text, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// The parts of a documentation block used for step documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Free text before the first tag.
    pub description: String,
    /// `@tag text` pairs in source order.
    pub tags: Vec<(String, String)>,
}

impl DocComment {
    /// Parse a `/** ... */` block.
    ///
    /// Parsing is lenient: missing delimiters, stray `*` gutters and unknown
    /// tags are all accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepscan::indexing::DocComment;
    ///
    /// let doc = DocComment::parse("/**\n * Feeds the cat.\n * @param n count\n */");
    /// assert_eq!(doc.description, "Feeds the cat.");
    /// assert_eq!(doc.tag("param"), Some("n count"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let inner = trimmed.strip_prefix("/**").unwrap_or(trimmed);
        let inner = inner.strip_suffix("*/").unwrap_or(inner);

        let mut doc = Self::default();
        let mut description = Vec::new();
        for line in inner.lines().map(unwrap_gutter) {
            if let Some(tagged) = line.strip_prefix('@') {
                let (name, text) = tagged.split_once(char::is_whitespace).unwrap_or((tagged, ""));
                doc.tags.push((name.to_owned(), text.trim().to_owned()));
            } else if let Some((_, text)) = doc.tags.last_mut() {
                let line = line.trim();
                if !line.is_empty() {
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(line);
                }
            } else {
                description.push(line);
            }
        }
        doc.description = description.join("\n").trim().to_owned();
        doc
    }

    /// Text of the first tag called `name`, if present and non-empty.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, text)| text.as_str())
            .filter(|text| !text.is_empty())
    }

    /// Choose the documentation shown for a step.
    ///
    /// Preference order: description, `@description`, `@desc`, then the
    /// declaring function's name.
    #[must_use]
    pub fn documentation(&self, function_name: Option<&str>) -> String {
        let chosen = if self.description.is_empty() {
            self.tag("description")
                .or_else(|| self.tag("desc"))
                .or(function_name)
                .unwrap_or_default()
        } else {
            self.description.as_str()
        };
        chosen.trim().to_owned()
    }
}

fn unwrap_gutter(line: &str) -> &str {
    let line = line.trim_start();
    let line = line.trim_start_matches('*');
    line.strip_prefix(' ').unwrap_or(line).trim_end()
}
