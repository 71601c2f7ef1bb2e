//! Repository for favorite municipalities
//!
//! Favorites are stored as a set of municipality codes under a namespace,
//! so several independent lists could share one database.

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;

/// Namespace used by the application's favorites list
pub const FAVORITES_NAMESPACE: &str = "yishuv-favorites";

/// Load all favorite codes in a namespace
pub async fn list_favorites(pool: &SqlitePool, namespace: &str) -> Result<BTreeSet<String>> {
    let rows = sqlx::query("SELECT code FROM favorites WHERE namespace = ? ORDER BY code")
        .bind(namespace)
        .fetch_all(pool)
        .await
        .context("Failed to list favorites")?;

    let mut codes = BTreeSet::new();
    for row in rows {
        codes.insert(row.try_get::<String, _>("code")?);
    }
    Ok(codes)
}

/// Add a code. Returns false when it was already a favorite.
pub async fn add_favorite(pool: &SqlitePool, namespace: &str, code: &str) -> Result<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO favorites (namespace, code) VALUES (?, ?)")
        .bind(namespace)
        .bind(code)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to add favorite: {}", code))?;

    Ok(result.rows_affected() > 0)
}

/// Remove a code. Returns false when it wasn't a favorite.
pub async fn remove_favorite(pool: &SqlitePool, namespace: &str, code: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE namespace = ? AND code = ?")
        .bind(namespace)
        .bind(code)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to remove favorite: {}", code))?;

    Ok(result.rows_affected() > 0)
}

/// Remove every favorite in a namespace, returning how many were removed
pub async fn clear_favorites(pool: &SqlitePool, namespace: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM favorites WHERE namespace = ?")
        .bind(namespace)
        .execute(pool)
        .await
        .context("Failed to clear favorites")?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::repository::connect_in_memory;

    #[tokio::test]
    async fn test_add_remove_and_list() {
        let pool = connect_in_memory().await.unwrap();

        assert!(add_favorite(&pool, FAVORITES_NAMESPACE, "3000").await.unwrap());
        assert!(!add_favorite(&pool, FAVORITES_NAMESPACE, "3000").await.unwrap());
        assert!(add_favorite(&pool, FAVORITES_NAMESPACE, "70").await.unwrap());
        assert!(add_favorite(&pool, "other", "4000").await.unwrap());

        let codes = list_favorites(&pool, FAVORITES_NAMESPACE).await.unwrap();
        assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec!["3000", "70"]);

        assert!(remove_favorite(&pool, FAVORITES_NAMESPACE, "70").await.unwrap());
        assert!(!remove_favorite(&pool, FAVORITES_NAMESPACE, "70").await.unwrap());

        assert_eq!(clear_favorites(&pool, FAVORITES_NAMESPACE).await.unwrap(), 1);
        assert!(list_favorites(&pool, FAVORITES_NAMESPACE).await.unwrap().is_empty());
        assert_eq!(list_favorites(&pool, "other").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.db");

        {
            let pool = crate::config::repository::connect(&path).await.unwrap();
            add_favorite(&pool, FAVORITES_NAMESPACE, "5000").await.unwrap();
            pool.close().await;
        }

        let pool = crate::config::repository::connect(&path).await.unwrap();
        let codes = list_favorites(&pool, FAVORITES_NAMESPACE).await.unwrap();
        assert!(codes.contains("5000"));
    }
}
