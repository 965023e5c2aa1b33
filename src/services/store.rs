use crate::models::{NeighborhoodRecord, NewNeighborhood, RecordFilter};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a neighborhood store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Backend unreachable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Seed data error: {0}")]
    Seed(String),
}

/// Read access to neighborhood records, plus creation
///
/// `find` must return records in a stable storage order (insertion order);
/// ranking ties fall back on it.
#[async_trait]
pub trait NeighborhoodStore: Send + Sync {
    /// Fetch every record matching `filter`, in storage order
    async fn find(&self, filter: &RecordFilter) -> Result<Vec<NeighborhoodRecord>, StoreError>;

    /// Persist a new record and return it with its assigned id
    async fn insert(&self, neighborhood: NewNeighborhood) -> Result<NeighborhoodRecord, StoreError>;

    /// Whether the backing store currently answers queries
    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Check the creation-time constraints of a record
pub fn validate_new(neighborhood: &NewNeighborhood) -> Result<(), StoreError> {
    if neighborhood.name.trim().is_empty() {
        return Err(StoreError::InvalidInput("name must not be empty".to_string()));
    }

    let attributes = [
        ("safety", neighborhood.safety),
        ("cafes", neighborhood.cafes),
        ("parks", neighborhood.parks),
        ("schools", neighborhood.schools),
        ("publicTransport", neighborhood.public_transport),
    ];

    for (field, value) in attributes {
        if !value.is_finite() || value < 0.0 {
            return Err(StoreError::InvalidInput(format!(
                "{} must be a non-negative number, got {}",
                field, value
            )));
        }
    }

    Ok(())
}
