// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AttributeKey, NeighborhoodRecord, NewNeighborhood, PreferenceSelection, RecordFilter, ScoredNeighborhood, UnknownAttribute};
pub use requests::{CreateNeighborhoodRequest, ListQuery, RankRequest};
pub use responses::{ErrorResponse, HealthResponse};
