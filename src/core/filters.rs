use crate::models::ScoredNeighborhood;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Display ordering applied on top of the ranked list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Highest score first
    #[default]
    Score,
    /// Alphabetical by name
    Name,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(SortMode::Score),
            "name" => Ok(SortMode::Name),
            other => Err(format!("sort mode must be 'score' or 'name', got '{}'", other)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Score => f.write_str("score"),
            SortMode::Name => f.write_str("name"),
        }
    }
}

/// Case-insensitive substring test with the needle trimmed
///
/// An empty (or all-whitespace) needle matches every name.
#[inline]
pub fn name_matches(name: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep entries whose name contains `query`, preserving order
pub fn apply_client_filter(results: &[ScoredNeighborhood], query: &str) -> Vec<ScoredNeighborhood> {
    results
        .iter()
        .filter(|entry| name_matches(entry.name(), query))
        .cloned()
        .collect()
}

/// Reorder entries for display
///
/// Both modes use a stable sort, so duplicates (equal scores or equal names)
/// keep their relative order.
pub fn apply_sort(results: &[ScoredNeighborhood], mode: SortMode) -> Vec<ScoredNeighborhood> {
    let mut sorted = results.to_vec();
    match mode {
        SortMode::Score => sorted.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortMode::Name => sorted.sort_by(|a, b| compare_names(a.name(), b.name())),
    }
    sorted
}

/// Collation for display names
///
/// Letters compare case-insensitively first; the raw strings only break ties,
/// so "apple" sorts before "Banana" and "ash" next to "Ash". There is no
/// locale table: accented letters order by code point, after plain `z`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| a.cmp(b))
}
