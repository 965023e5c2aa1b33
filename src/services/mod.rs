// Service exports
pub mod memory;
pub mod postgres;
pub mod ranking;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use ranking::{RankingError, RankingService};
pub use store::{NeighborhoodStore, StoreError};
