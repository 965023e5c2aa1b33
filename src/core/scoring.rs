use crate::models::{NeighborhoodRecord, PreferenceSelection};

/// Composite score of a record for a selection
///
/// score = Σ record[k] for every k in the selection
///
/// An empty selection scores 0. The selection iterates in a fixed key order,
/// so the floating-point sum is the same on every call.
#[inline]
pub fn calculate_score(record: &NeighborhoodRecord, selection: &PreferenceSelection) -> f64 {
    selection.iter().map(|key| record.attribute(key)).sum()
}
