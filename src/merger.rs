//! Append-only merging of normalized domain batches into a corpus.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counters describing a single merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Corpus size before the merge
    pub existing_count: usize,
    /// Size of the incoming batch
    pub new_count: usize,
    /// Domains in the batch that were not already in the corpus
    pub newly_added_count: usize,
    /// Corpus size after the merge
    pub total_count: usize,
    /// Always 0: priority tagging no longer affects ordering, the field is
    /// kept for the stats file shape
    pub priority_count: usize,
}

/// Merge an incoming batch into the existing corpus.
///
/// Returns the full corpus as a sorted list plus merge counters. The output
/// is a superset of `existing`: domains are only ever added, never removed.
/// Ordering is plain lexicographic; the `priority` set is accepted but does
/// not reorder anything (the old priority-first ordering was replaced by
/// pure alphabetical order).
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use oustdom::merger::merge;
///
/// let existing: HashSet<String> = ["a.com", "b.com"].iter().map(|s| s.to_string()).collect();
/// let incoming: HashSet<String> = ["b.com", "c.com"].iter().map(|s| s.to_string()).collect();
///
/// let (domains, stats) = merge(&existing, &incoming, &HashSet::new());
/// assert_eq!(domains, vec!["a.com", "b.com", "c.com"]);
/// assert_eq!(stats.newly_added_count, 1);
/// assert_eq!(stats.total_count, 3);
/// ```
pub fn merge(
    existing: &HashSet<String>,
    incoming: &HashSet<String>,
    _priority: &HashSet<String>,
) -> (Vec<String>, MergeStats) {
    let mut all: Vec<String> = existing.union(incoming).cloned().collect();
    all.sort_unstable();

    let stats = MergeStats {
        existing_count: existing.len(),
        new_count: incoming.len(),
        newly_added_count: incoming.difference(existing).count(),
        total_count: all.len(),
        priority_count: 0,
    };

    (all, stats)
}
