//! Scenario outline placeholder substitution.
//!
//! Only the header row and the first data row of each `Examples:` table are
//! read. Later tables overwrite values from earlier ones, so a document is
//! treated as one flat name-to-value map.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static EXAMPLES_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Examples:\s*$").unwrap_or_else(|_| unreachable!()));

static CELL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*").unwrap_or_else(|_| unreachable!()));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").unwrap_or_else(|_| unreachable!()));

/// Collect outline values from every `Examples:` table in `document`.
///
/// A table contributes only when both its header row and first data row are
/// present. Empty cells are ignored.
///
/// # Examples
///
/// ```
/// use stepscan::resolve::outline_values;
///
/// let doc = "Scenario Outline: cats\n  Given I have <count> cats\n  Examples:\n    | count |\n    | 5     |\n";
/// let values = outline_values(doc);
/// assert_eq!(values.get("count").map(String::as_str), Some("5"));
/// ```
#[must_use]
pub fn outline_values(document: &str) -> HashMap<String, String> {
    let lines: Vec<&str> = document.lines().collect();
    let mut values = HashMap::new();
    for (index, line) in lines.iter().enumerate() {
        if !EXAMPLES_HEADING.is_match(line) {
            continue;
        }
        let Some(data) = lines.get(index + 2).filter(|row| !row.is_empty()) else {
            continue;
        };
        let Some(header) = lines.get(index + 1) else {
            continue;
        };
        for (name, value) in table_cells(header).into_iter().zip(table_cells(data)) {
            if !value.is_empty() {
                values.insert(name.to_owned(), value.to_owned());
            }
        }
    }
    values
}

/// Cells between the outer pipes of a table row.
fn table_cells(row: &str) -> Vec<&str> {
    let parts: Vec<&str> = CELL_SEPARATOR.split(row).collect();
    parts
        .get(1..parts.len().saturating_sub(1))
        .map(<[&str]>::to_vec)
        .unwrap_or_default()
}

/// Whether `line` contains any `<name>` placeholder.
#[must_use]
pub fn has_placeholders(line: &str) -> bool {
    PLACEHOLDER.is_match(line)
}

/// Replace placeholders in `line` with their outline values.
///
/// Each placeholder found in the line replaces its first remaining
/// occurrence, optionally wrapped in double quotes. Placeholders without a
/// value are left untouched.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use stepscan::resolve::substitute_placeholders;
///
/// let values = HashMap::from([("name".to_owned(), "Tom".to_owned())]);
/// assert_eq!(substitute_placeholders("I am <name>", &values, false), "I am Tom");
/// assert_eq!(substitute_placeholders("I am <name>", &values, true), "I am \"Tom\"");
/// assert_eq!(substitute_placeholders("I am <age>", &values, true), "I am <age>");
/// ```
#[must_use]
pub fn substitute_placeholders(line: &str, values: &HashMap<String, String>, quoted: bool) -> String {
    let mut result = line.to_owned();
    for found in PLACEHOLDER.find_iter(line) {
        let key = found.as_str().replace(['<', '>'], "");
        let Some(value) = values.get(&key) else {
            continue;
        };
        let replacement = if quoted {
            format!("\"{value}\"")
        } else {
            value.clone()
        };
        result = result.replacen(&format!("<{key}>"), &replacement, 1);
    }
    result
}
