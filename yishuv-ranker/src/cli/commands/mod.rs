//! Command handlers

pub mod battle;
pub mod export;
pub mod favorites;
pub mod fields;
pub mod leaderboard;
pub mod show;
pub mod summary;

use anyhow::{Context, Result};
use colored::*;

use crate::api::{load_snapshot, source_from_config};
use crate::config::{Config, repository};
use crate::services::favorites::FavoriteStore;
use crate::yishuv::Snapshot;

/// Load and merge all datasets as configured
pub async fn load_data(config: &Config) -> Result<Snapshot> {
    let source = source_from_config(&config.api)?;
    eprintln!(
        "{}",
        format!("טוען נתונים מ-3 מקורות ({})...", source.describe()).dimmed()
    );

    let snapshot = load_snapshot(source.as_ref())
        .await
        .context("Failed to load municipality data. Check your connection and try again")?;

    if snapshot.is_empty() {
        anyhow::bail!("The data sources returned no usable municipalities");
    }
    Ok(snapshot)
}

/// Open the favorites store from the configured database
pub async fn open_favorites(config: &Config) -> Result<FavoriteStore> {
    let pool = repository::connect(&config.storage.database_path).await?;
    Ok(FavoriteStore::new(pool))
}
