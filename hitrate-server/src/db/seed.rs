use crate::core::{HitrateError, Result};
use sqlx::SqlitePool;
use tracing::info;

const CHUNK_SIZE: u32 = 500;

/// Fill an empty items table with `count` dummy rows.
///
/// Rows are named `Item 1` through `Item N` and inserted in chunks, so a
/// 10,000-row seed costs a handful of statements. A table that already has
/// rows is left alone.
pub async fn seed_items(pool: &SqlitePool, count: u32) -> Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
        .fetch_one(pool)
        .await
        .map_err(|e| HitrateError::Database(e.to_string()))?;

    if existing > 0 {
        info!("Items table already has {} rows, skipping seed", existing);
        return Ok(());
    }

    info!("Seeding {} items in chunks of {}", count, CHUNK_SIZE);
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let mut inserted = 0u32;
    while inserted < count {
        let chunk = CHUNK_SIZE.min(count - inserted);
        let placeholders = vec!["(?, ?, ?)"; chunk as usize].join(", ");
        let sql = format!(
            "INSERT INTO items (name, created_at, updated_at) VALUES {}",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for offset in 0..chunk {
            query = query
                .bind(format!("Item {}", inserted + offset + 1))
                .bind(&now)
                .bind(&now);
        }

        query
            .execute(pool)
            .await
            .map_err(|e| HitrateError::Database(e.to_string()))?;

        inserted += chunk;
    }

    info!("Seeded {} items", inserted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn count_rows(pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn seeds_requested_row_count() {
        let pool = db::memory_pool().await;

        seed_items(&pool, 1_234).await.unwrap();

        assert_eq!(count_rows(&pool).await, 1_234);
    }

    #[tokio::test]
    async fn partial_final_chunk_is_handled() {
        let pool = db::memory_pool().await;

        seed_items(&pool, 7).await.unwrap();

        assert_eq!(count_rows(&pool).await, 7);
        let (name,): (String,) = sqlx::query_as("SELECT name FROM items WHERE id = 7")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, "Item 7");
    }

    #[tokio::test]
    async fn non_empty_table_is_not_reseeded() {
        let pool = db::memory_pool().await;

        seed_items(&pool, 10).await.unwrap();
        seed_items(&pool, 10_000).await.unwrap();

        assert_eq!(count_rows(&pool).await, 10);
    }
}
