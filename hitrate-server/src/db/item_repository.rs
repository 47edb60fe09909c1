use crate::core::{DataSource, HitrateError, Item, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{error, instrument};

type ItemRow = (i64, String);

/// SQLite-backed item source. Read-only; the cache layer sits on top.
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataSource for SqliteItemRepository {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>("SELECT id, name FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch items from database");
                HitrateError::SourceUnavailable(e.to_string())
            })?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Item { id, name })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn fetch_all_returns_rows_in_id_order() {
        let pool = db::memory_pool().await;
        sqlx::query(
            "INSERT INTO items (name, created_at, updated_at)
             VALUES ('B', '2026-01-01 00:00:00', '2026-01-01 00:00:00'),
                    ('A', '2026-01-01 00:00:00', '2026-01-01 00:00:00')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let repo = SqliteItemRepository::new(pool);
        let items = repo.fetch_all().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Item { id: 1, name: "B".to_string() });
        assert_eq!(items[1], Item { id: 2, name: "A".to_string() });
    }

    #[tokio::test]
    async fn fetch_all_on_empty_table_is_empty() {
        let pool = db::memory_pool().await;
        let repo = SqliteItemRepository::new(pool);

        assert!(repo.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_source_unavailable() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let repo = SqliteItemRepository::new(pool);
        let err = repo.fetch_all().await.unwrap_err();

        assert!(matches!(err, HitrateError::SourceUnavailable(_)));
    }
}
