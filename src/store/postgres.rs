//! PostgreSQL tile store
//!
//! sqlx pool over a single `dday_tiles` table. The unique constraint on the
//! coordinate pair and the in-SQL like increment keep both invariants in the
//! database. Likes saturate at `i32::MAX`, matching the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use super::{StoreError, StoreResult, TileStore};
use crate::models::{NewTile, Tile, TileFilter};

/// Schema for the tiles table.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dday_tiles (
    id          UUID PRIMARY KEY,
    title       VARCHAR(50) NOT NULL,
    target_date TIMESTAMPTZ NOT NULL,
    coord_x     INTEGER NOT NULL,
    coord_y     INTEGER NOT NULL,
    color       TEXT NOT NULL,
    likes       INTEGER NOT NULL DEFAULT 0,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT dday_tiles_coord_key UNIQUE (coord_x, coord_y)
)";

const INDEX: &str =
    "CREATE INDEX IF NOT EXISTS dday_tiles_target_date_idx ON dday_tiles (target_date)";

const COLUMNS: &str =
    "id, title, target_date, coord_x, coord_y, color, likes, created_at, updated_at";

// == Pg Tile Store ==
/// Tile store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgTileStore {
    pool: PgPool,
}

impl PgTileStore {
    /// Connects a pool and makes sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_err)?;

        let store = Self::from_pool(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Wraps an existing pool without touching the schema.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the table and index if missing.
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        sqlx::query(INDEX)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        info!("dday_tiles schema ready");
        Ok(())
    }
}

#[async_trait]
impl TileStore for PgTileStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tile>> {
        let sql = format!("SELECT {COLUMNS} FROM dday_tiles WHERE id = $1");
        sqlx::query_as::<_, Tile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn find_many(&self, filter: TileFilter) -> StoreResult<Vec<Tile>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM dday_tiles \
             WHERE ($1::timestamptz IS NULL OR target_date >= $1) \
               AND ($2::timestamptz IS NULL OR updated_at > $2) \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Tile>(&sql)
            .bind(filter.target_on_or_after)
            .bind(filter.updated_after)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn create(&self, tile: NewTile) -> StoreResult<Tile> {
        let sql = format!(
            "INSERT INTO dday_tiles (id, title, target_date, coord_x, coord_y, color) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tile>(&sql)
            .bind(Uuid::new_v4())
            .bind(&tile.title)
            .bind(tile.target_date)
            .bind(tile.coord_x)
            .bind(tile.coord_y)
            .bind(&tile.color)
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn increment_likes(&self, id: Uuid) -> StoreResult<Tile> {
        let sql = format!(
            "UPDATE dday_tiles \
             SET likes = CASE WHEN likes < 2147483647 THEN likes + 1 ELSE likes END, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_target_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM dday_tiles WHERE target_date < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected())
    }
}

/// Translates sqlx errors into store outcomes.
fn map_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Other(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert_eq!(map_err(sqlx::Error::RowNotFound), StoreError::NotFound);
    }

    #[test]
    fn test_other_errors_keep_detail() {
        let err = map_err(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Other(detail) if !detail.is_empty()));
    }

    // Needs a disposable database: the table is emptied first.
    // TEST_DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_postgres_round_trip() {
        use chrono::Duration;

        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let store = PgTileStore::connect(&url, 2).await.unwrap();
        sqlx::query("DELETE FROM dday_tiles")
            .execute(&store.pool)
            .await
            .unwrap();

        let now = Utc::now();
        let new_tile = |x: i32, days: i64| NewTile {
            title: format!("pg {x}"),
            target_date: now + Duration::days(days),
            coord_x: x,
            coord_y: 0,
            color: "#abc".to_string(),
        };

        // RETURNING yields server defaults
        let live = store.create(new_tile(0, 3)).await.unwrap();
        assert_eq!(live.likes, 0);
        assert_eq!(live.coord_x, 0);
        assert_eq!(
            store.create(new_tile(0, 5)).await,
            Err(StoreError::Conflict)
        );
        let expired = store.create(new_tile(1, -10)).await.unwrap();

        // Like increments and bumps updated_at
        let liked = store.increment_likes(live.id).await.unwrap();
        assert_eq!(liked.likes, 1);
        assert!(liked.updated_at >= live.updated_at);
        assert_eq!(
            store.increment_likes(Uuid::new_v4()).await,
            Err(StoreError::NotFound)
        );

        // Saturates instead of overflowing
        sqlx::query("UPDATE dday_tiles SET likes = 2147483647 WHERE id = $1")
            .bind(live.id)
            .execute(&store.pool)
            .await
            .unwrap();
        assert_eq!(store.increment_likes(live.id).await.unwrap().likes, i32::MAX);

        // Filters: both unset, window only, window plus since
        assert_eq!(store.find_many(TileFilter::default()).await.unwrap().len(), 2);
        let windowed = store
            .find_many(TileFilter {
                target_on_or_after: Some(now - Duration::days(7)),
                updated_after: None,
            })
            .await
            .unwrap();
        assert_eq!(windowed.len(), 1);
        assert_eq!(windowed[0].id, live.id);
        let none_newer = store
            .find_many(TileFilter {
                target_on_or_after: Some(now - Duration::days(7)),
                updated_after: Some(Utc::now() + Duration::minutes(1)),
            })
            .await
            .unwrap();
        assert!(none_newer.is_empty());

        assert_eq!(store.find_by_id(expired.id).await.unwrap(), Some(expired.clone()));
        assert_eq!(
            store.delete_target_before(now - Duration::days(7)).await.unwrap(),
            1
        );
        assert_eq!(
            store.delete_target_before(now - Duration::days(7)).await.unwrap(),
            0
        );
        assert!(store.find_by_id(expired.id).await.unwrap().is_none());
    }
}
