use crate::core::scoring::calculate_score;
use crate::models::{NeighborhoodRecord, PreferenceSelection, ScoredNeighborhood};

/// Scores and orders neighborhood records
///
/// # Pipeline
/// 1. Score every record against the selection
/// 2. Stable sort, highest score first
///
/// The ranker holds no state between calls; the same inputs always yield the
/// same output, and records with equal scores keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    pub fn new() -> Self {
        Self
    }

    /// Rank records for a selection
    ///
    /// # Arguments
    /// * `selection` - Attributes to sum; may be empty
    /// * `records` - Records in their original (storage) order
    ///
    /// # Returns
    /// One scored entry per input record, ordered by descending score
    pub fn rank(
        &self,
        selection: &PreferenceSelection,
        records: &[NeighborhoodRecord],
    ) -> Vec<ScoredNeighborhood> {
        let mut scored: Vec<ScoredNeighborhood> = records
            .iter()
            .map(|record| ScoredNeighborhood {
                score: calculate_score(record, selection),
                record: record.clone(),
            })
            .collect();

        // sort_by is stable, so ties stay in storage order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        scored
    }
}
