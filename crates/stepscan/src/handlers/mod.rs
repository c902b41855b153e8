//! Editor request handlers.
//!
//! Each handler answers one question about a specification line against a
//! [`StepIndex`](crate::indexing::StepIndex): validation, definition lookup
//! and completion. Usage counting lives alongside them because completion
//! ranking depends on it.

mod completion;
mod definition;
mod usage;
mod validate;

pub use completion::{CompletionCandidate, complete, sort_key};
pub use definition::resolve_definition;
pub use usage::{confirm_completion, seed_from_document, seed_usage_counts};
pub use validate::{DIAGNOSTIC_SOURCE, validate, validate_document};
