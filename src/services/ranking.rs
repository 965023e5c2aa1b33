use crate::core::{parse_selection, PreferenceError, Ranker, UnknownKeyPolicy};
use crate::models::{NeighborhoodRecord, NewNeighborhood, PreferenceSelection, RecordFilter, ScoredNeighborhood};
use crate::services::store::{NeighborhoodStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the ranking service
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] StoreError),

    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] PreferenceError),
}

/// Scoring service: reads records from the injected store and ranks them
///
/// Holds no per-request state, so one instance is shared across all
/// handlers and workers.
#[derive(Clone)]
pub struct RankingService {
    store: Arc<dyn NeighborhoodStore>,
    ranker: Ranker,
    policy: UnknownKeyPolicy,
}

impl RankingService {
    pub fn new(store: Arc<dyn NeighborhoodStore>, policy: UnknownKeyPolicy) -> Self {
        Self {
            store,
            ranker: Ranker::new(),
            policy,
        }
    }

    pub fn policy(&self) -> UnknownKeyPolicy {
        self.policy
    }

    /// Rank every stored record for raw request keys
    ///
    /// Keys are validated before storage is touched, so a malformed request
    /// never costs a query.
    pub async fn rank<S: AsRef<str> + Sync>(
        &self,
        raw_preferences: &[S],
    ) -> Result<Vec<ScoredNeighborhood>, RankingError> {
        let selection = parse_selection(raw_preferences, self.policy)?;
        self.rank_selection(&selection).await
    }

    /// Rank every stored record for an already-parsed selection
    pub async fn rank_selection(
        &self,
        selection: &PreferenceSelection,
    ) -> Result<Vec<ScoredNeighborhood>, RankingError> {
        let records = self
            .store
            .find(&RecordFilter::all())
            .await
            .map_err(RankingError::StorageUnavailable)?;

        Ok(self.ranker.rank(selection, &records))
    }

    /// Unscored listing, optionally narrowed by name
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<NeighborhoodRecord>, RankingError> {
        self.store
            .find(filter)
            .await
            .map_err(RankingError::StorageUnavailable)
    }

    pub async fn create(&self, neighborhood: NewNeighborhood) -> Result<NeighborhoodRecord, StoreError> {
        self.store.insert(neighborhood).await
    }

    /// `true` when the store answers; errors count as unhealthy
    pub async fn healthy(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }
}
