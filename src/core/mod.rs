// Core algorithm exports
pub mod filters;
pub mod preferences;
pub mod ranker;
pub mod scoring;

pub use filters::{apply_client_filter, apply_sort, compare_names, name_matches, SortMode};
pub use preferences::{parse_selection, PreferenceError, UnknownKeyPolicy};
pub use ranker::Ranker;
pub use scoring::calculate_score;
