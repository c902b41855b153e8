//! Expansion of `(a|b)` alternation groups into concrete step variants.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on the number of variants produced for one template.
pub const MAX_VARIANTS: usize = 256;

static ALTERNATION_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^()]+\|[^()]+\)").unwrap_or_else(|_| unreachable!())
});

/// Expand the flat alternation groups of a template into every combination.
///
/// The first group without nested parentheses that contains `|` is replaced
/// by each of its alternatives in turn (a leading `?:` is dropped) and the
/// results are expanded recursively. A template without such a group yields
/// itself. Output stops growing once [`MAX_VARIANTS`] entries exist.
///
/// # Examples
/// ```
/// use stepscan_patterns::expand_variants;
///
/// assert_eq!(
///     expand_variants("I have (one|two) (cat|dog)"),
///     vec!["I have one cat", "I have one dog", "I have two cat", "I have two dog"]
/// );
/// assert_eq!(expand_variants("plain step"), vec!["plain step"]);
/// ```
#[must_use]
pub fn expand_variants(template: &str) -> Vec<String> {
    let mut variants = Vec::new();
    expand_into(template, &mut variants);
    variants
}

fn expand_into(template: &str, out: &mut Vec<String>) {
    if out.len() >= MAX_VARIANTS {
        return;
    }
    let Some(group) = ALTERNATION_GROUP.find(template) else {
        out.push(template.to_owned());
        return;
    };
    let inner = group
        .as_str()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or_default();
    let inner = inner.strip_prefix("?:").unwrap_or(inner);
    for alternative in inner.split('|') {
        let candidate = template.replacen(group.as_str(), alternative, 1);
        expand_into(&candidate, out);
        if out.len() >= MAX_VARIANTS {
            return;
        }
    }
}
