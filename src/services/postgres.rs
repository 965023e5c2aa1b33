use crate::models::{NeighborhoodRecord, NewNeighborhood, RecordFilter};
use crate::services::store::{validate_new, NeighborhoodStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

/// PostgreSQL-backed neighborhood store
///
/// Records live in the `neighborhoods` table; the `position` column keeps
/// insertion order so reads come back in a stable sequence.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    fn row_to_record(row: &PgRow) -> Result<NeighborhoodRecord, sqlx::Error> {
        Ok(NeighborhoodRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            safety: row.try_get("safety")?,
            cafes: row.try_get("cafes")?,
            parks: row.try_get("parks")?,
            schools: row.try_get("schools")?,
            public_transport: row.try_get("public_transport")?,
        })
    }
}

#[async_trait]
impl NeighborhoodStore for PostgresStore {
    async fn find(&self, filter: &RecordFilter) -> Result<Vec<NeighborhoodRecord>, StoreError> {
        let query = r#"
            SELECT id, name, safety, cafes, parks, schools, public_transport
            FROM neighborhoods
            WHERE ($1::TEXT IS NULL OR strpos(lower(name), lower($1)) > 0)
            ORDER BY position
        "#;

        let needle = filter
            .name_contains
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let rows = sqlx::query(query).bind(needle).fetch_all(&self.pool).await?;

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} neighborhoods", records.len());

        Ok(records)
    }

    async fn insert(&self, neighborhood: NewNeighborhood) -> Result<NeighborhoodRecord, StoreError> {
        validate_new(&neighborhood)?;

        let query = r#"
            INSERT INTO neighborhoods (id, name, safety, cafes, parks, schools, public_transport)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        let record = neighborhood.into_record(uuid::Uuid::new_v4().to_string());

        sqlx::query(query)
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.safety)
            .bind(record.cafes)
            .bind(record.parks)
            .bind(record.schools)
            .bind(record.public_transport)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Inserted neighborhood {} ({})", record.name, record.id);

        Ok(record)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
