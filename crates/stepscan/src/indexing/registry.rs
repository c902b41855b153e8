//! In-memory index of compiled step entries.
//!
//! The index keeps entries in discovery order, which is also lookup order:
//! the first entry whose matcher accepts a line wins. Entries are unique by
//! identity and the first one discovered is kept. Indexes are rebuilt
//! wholesale; [`StepIndex::rebuild`] carries usage counts forward so ranking
//! survives file changes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::{IndexOptions, StepEntry, extract_steps};

/// Identity-keyed collection of step entries in discovery order.
#[derive(Debug, Default, Clone)]
pub struct StepIndex {
    entries: Vec<StepEntry>,
    positions: HashMap<String, usize>,
}

impl StepIndex {
    /// Build a fresh index from declaration files.
    ///
    /// Files are read in the order given. Unreadable files are logged at
    /// `warn` and skipped.
    #[must_use]
    pub fn build<P: AsRef<Path>>(paths: &[P], options: &IndexOptions) -> Self {
        let mut index = Self::default();
        for path in paths {
            let path = path.as_ref();
            match fs::read_to_string(path) {
                Ok(source) => index.add_source(path, &source, options),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to read step file");
                }
            }
        }
        info!(
            files = paths.len(),
            steps = index.len(),
            "built step index"
        );
        index
    }

    /// Build a fresh index and carry over this index's usage counts.
    #[must_use]
    pub fn rebuild<P: AsRef<Path>>(&self, paths: &[P], options: &IndexOptions) -> Self {
        let mut next = Self::build(paths, options);
        next.merge_usage_counts(self);
        next
    }

    /// Index the steps declared in one source text.
    ///
    /// Entries whose identity is already present are skipped.
    pub fn add_source(&mut self, path: &Path, source: &str, options: &IndexOptions) {
        let mut added = 0usize;
        for entry in extract_steps(path, source, options) {
            if self.insert(entry) {
                added += 1;
            }
        }
        debug!(path = %path.display(), steps = added, "indexed step file");
    }

    /// Insert an entry unless its identity is already indexed.
    ///
    /// Returns `true` when the entry was added.
    pub fn insert(&mut self, entry: StepEntry) -> bool {
        if self.positions.contains_key(&entry.identity) {
            return false;
        }
        self.positions
            .insert(entry.identity.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Copy usage counts from `previous` for every identity present in both.
    pub fn merge_usage_counts(&mut self, previous: &Self) {
        for entry in &mut self.entries {
            if let Some(old) = previous.get(&entry.identity) {
                entry.usage_count = old.usage_count;
            }
        }
    }

    /// Entries in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[StepEntry] {
        &self.entries
    }

    /// Look up an entry by identity.
    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&StepEntry> {
        self.positions
            .get(identity)
            .and_then(|&position| self.entries.get(position))
    }

    /// First entry, in discovery order, whose matcher accepts `text`.
    #[must_use]
    pub fn find_by_text(&self, text: &str) -> Option<&StepEntry> {
        self.entries
            .iter()
            .find(|entry| entry.match_pattern.is_match(text))
    }

    /// Increment the usage count of the entry with `identity`.
    ///
    /// Returns `false` when no such entry exists.
    pub fn increment_usage(&mut self, identity: &str) -> bool {
        let Some(entry) = self
            .positions
            .get(identity)
            .and_then(|&position| self.entries.get_mut(position))
        else {
            return false;
        };
        entry.usage_count = entry.usage_count.saturating_add(1);
        true
    }

    /// Set every usage count back to zero.
    pub fn reset_usage_counts(&mut self) {
        for entry in &mut self.entries {
            entry.usage_count = 0;
        }
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
