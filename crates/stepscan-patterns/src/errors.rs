//! Error types shared by the pattern compilation modules.

use thiserror::Error;

/// Errors surfaced while converting step templates into regular expressions.
///
/// Normalisation itself never fails; the only failure point is handing the
/// generated source to the regex engine. Callers treat this as a skip signal
/// for a single candidate rather than a fatal error.
///
/// # Examples
/// ```
/// use stepscan_patterns::{PatternError, compile_step_pattern};
///
/// let Err(err) = compile_step_pattern("I am (unbalanced", &[]) else {
///     panic!("unbalanced group should not compile");
/// };
/// assert!(matches!(err, PatternError::Regex { .. }));
/// assert!(err.to_string().contains("I am (unbalanced"));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The normalised source was rejected by the regex engine.
    #[error("invalid step pattern `{pattern}`: {source}")]
    Regex {
        /// The generated regular-expression source.
        pattern: String,
        /// The underlying compilation error.
        source: regex::Error,
    },
}

impl PatternError {
    pub(crate) fn regex(pattern: &str, source: regex::Error) -> Self {
        Self::Regex {
            pattern: pattern.to_owned(),
            source,
        }
    }
}
