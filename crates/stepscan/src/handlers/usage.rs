//! Usage counting for completion ranking.
//!
//! Counts are seeded from existing specification files and then bumped each
//! time the user accepts a completion.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::indexing::StepIndex;
use crate::resolve::find_step;

/// Recount step usage from specification files.
///
/// Existing counts are cleared first. Every step line that resolves adds
/// one use to its entry. Unreadable files are logged at `warn` and skipped.
pub fn seed_usage_counts<P: AsRef<Path>>(index: &mut StepIndex, spec_paths: &[P]) {
    index.reset_usage_counts();
    let mut uses = 0usize;
    for path in spec_paths {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(document) => {
                let found = seed_from_document(index, &document);
                debug!(path = %path.display(), uses = found, "counted step usage");
                uses += found;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read specification file");
            }
        }
    }
    info!(files = spec_paths.len(), uses, "seeded step usage counts");
}

/// Add one use for every resolving step line in `document`.
///
/// Returns the number of uses added.
pub fn seed_from_document(index: &mut StepIndex, document: &str) -> usize {
    let identities = resolved_identities(index, document);
    for identity in &identities {
        index.increment_usage(identity);
    }
    identities.len()
}

fn resolved_identities(index: &StepIndex, document: &str) -> Vec<String> {
    document
        .lines()
        .filter_map(|line| find_step(index, line, document))
        .map(|entry| entry.identity.clone())
        .collect()
}

/// Record that the completion for `identity` was accepted.
///
/// Returns `false` when the identity is not indexed.
pub fn confirm_completion(index: &mut StepIndex, identity: &str) -> bool {
    index.increment_usage(identity)
}
