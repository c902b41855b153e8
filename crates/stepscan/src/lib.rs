//! Step-definition indexing and Gherkin step matching for editor tooling.
//!
//! The crate scans arbitrary source files for step-defining declarations
//! (`Given('...')`, `@when("...")`, `defineStep(/.../)` and friends in any
//! supported Gherkin dialect), compiles each step template into a matcher and
//! answers the questions an editor asks about a `.feature` line:
//!
//! - Does any indexed step match it? ([`handlers::validate`])
//! - Where is the matching step declared? ([`handlers::resolve_definition`])
//! - Which steps could complete it? ([`handlers::complete`])
//!
//! Extraction is heuristic: one generalised recognition pattern plus a
//! comment-stripping validation pass, with no source-language parsing.
//!
//! # Configuration
//!
//! Settings are read from a JSON file, either an editor `settings.json` with
//! `cucumberautocomplete.*` keys or a plain object with the same keys. The
//! log level can be set with `STEPSCAN_LOG_LEVEL`.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use stepscan::handlers::validate;
//! use stepscan::indexing::{IndexOptions, StepIndex};
//!
//! let mut index = StepIndex::default();
//! index.add_source(
//!     &PathBuf::from("steps.js"),
//!     "Given('I have {int} cats', () => {});",
//!     &IndexOptions::default(),
//! );
//! assert!(validate(&index, "  Given I have 3 cats", 0, "").is_none());
//! assert!(validate(&index, "  Given I have 3 dogs", 0, "").is_some());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod handlers;
pub mod indexing;
pub mod logging;
pub mod resolve;
pub mod util;

/// Test support utilities for unit and integration tests.
///
/// This module is hidden from documentation as it's intended for internal
/// test use only.
#[cfg(feature = "test-support")]
#[doc(hidden)]
pub mod test_support;
