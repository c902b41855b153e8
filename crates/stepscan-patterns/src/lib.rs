//! Shared step-template compilation utilities for stepscan.
//!
//! Step definitions register their text in several syntaxes: plain strings,
//! regular expressions, Cucumber expressions with `{int}`-style parameters and
//! Ruby `#{...}` interpolation. This crate turns such a template into the two
//! regular expressions the indexer needs (a full matcher and a prefix-tolerant
//! partial matcher), expands `(a|b)` alternation groups into concrete
//! variants, builds completion insert texts, and owns the multilingual Gherkin
//! keyword table shared by declaration scanning and feature-line matching.

mod errors;
mod hint;
mod keyword;
mod pattern;
mod snippet;
mod variants;

pub use errors::PatternError;
pub use hint::builtin_parameter_pattern;
pub use keyword::{GENERIC_STEP_MARKERS, GHERKIN_KEYWORDS, StepKeyword, keyword_alternation};
pub use pattern::{
    CompiledStepPattern, CustomParameter, build_partial_regex, build_regex_from_template,
    compile_partial_pattern, compile_step_pattern, display_text, split_pattern_parts,
};
pub use snippet::completion_insert_text;
pub use variants::{MAX_VARIANTS, expand_variants};
