//! Favorite municipalities
//!
//! `FavoriteSet` is the membership view the rest of the app works with;
//! `FavoriteStore` keeps it in sync with the database.

use anyhow::Result;
use sqlx::SqlitePool;
use std::collections::BTreeSet;

use crate::config::repository::favorites;
use crate::yishuv::{Municipality, Snapshot};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    codes: BTreeSet<String>,
}

impl FavoriteSet {
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Favorites present in the snapshot, in natural order
    pub fn resolve<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Municipality> {
        snapshot.select_codes(|code| self.contains(code))
    }
}

impl From<BTreeSet<String>> for FavoriteSet {
    fn from(codes: BTreeSet<String>) -> Self {
        Self { codes }
    }
}

impl FromIterator<String> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Database-backed favorites under a fixed namespace
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    pool: SqlitePool,
    namespace: String,
}

impl FavoriteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_namespace(pool, favorites::FAVORITES_NAMESPACE)
    }

    pub fn with_namespace(pool: SqlitePool, namespace: &str) -> Self {
        Self {
            pool,
            namespace: namespace.to_string(),
        }
    }

    pub async fn load(&self) -> Result<FavoriteSet> {
        Ok(favorites::list_favorites(&self.pool, &self.namespace)
            .await?
            .into())
    }

    pub async fn add(&self, code: &str) -> Result<bool> {
        favorites::add_favorite(&self.pool, &self.namespace, code).await
    }

    pub async fn remove(&self, code: &str) -> Result<bool> {
        favorites::remove_favorite(&self.pool, &self.namespace, code).await
    }

    /// Flip membership in the database; returns true when now a favorite
    pub async fn toggle(&self, code: &str) -> Result<bool> {
        if self.remove(code).await? {
            Ok(false)
        } else {
            self.add(code).await
        }
    }

    pub async fn clear(&self) -> Result<u64> {
        favorites::clear_favorites(&self.pool, &self.namespace).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::repository::connect_in_memory;
    use crate::yishuv::{AgeBrackets, Socioeconomics};

    fn make(code: &str, population: u64) -> Municipality {
        Municipality::new(
            code.into(),
            format!("ישוב {}", code),
            "השרון".into(),
            None,
            population,
            AgeBrackets::default(),
            Socioeconomics::default(),
        )
    }

    #[test]
    fn test_resolve_keeps_natural_order() {
        let snapshot = Snapshot::new(vec![make("1", 300), make("2", 200), make("3", 100)]);
        let set: FavoriteSet = ["3", "99", "1"].into_iter().map(String::from).collect();

        let codes: Vec<_> = set.resolve(&snapshot).iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "3"]);
        assert_eq!(set.len(), 3);
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = FavoriteStore::new(connect_in_memory().await.unwrap());

        assert!(store.toggle("70").await.unwrap());
        assert!(store.add("3000").await.unwrap());
        assert!(!store.toggle("70").await.unwrap());

        let set = store.load().await.unwrap();
        assert!(set.contains("3000"));
        assert!(!set.contains("70"));
        assert_eq!(store.clear().await.unwrap(), 1);
    }
}
