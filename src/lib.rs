//! Neighborhood Matcher - preference-based neighborhood ranking
//!
//! The service sums the lifestyle attributes a user selected (safety, cafes,
//! parks, schools, public transport) for every stored neighborhood and returns
//! the collection ranked by that score. The client module holds the search
//! session that calls the service and re-filters/re-sorts its results.

pub mod client;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{apply_client_filter, apply_sort, Ranker, SortMode, UnknownKeyPolicy};
pub use models::{AttributeKey, NeighborhoodRecord, PreferenceSelection, ScoredNeighborhood};
pub use services::{InMemoryStore, NeighborhoodStore, RankingService};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let selection: PreferenceSelection = [AttributeKey::Safety].into_iter().collect();
        assert!(Ranker::new().rank(&selection, &[]).is_empty());
    }
}
