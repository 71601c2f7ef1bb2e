//! Raw record sources
//!
//! The merge pipeline needs all three datasets. They come either from the
//! live API or from a directory of JSON dumps; both are fetched concurrently
//! and the load fails as a whole if any one of them fails.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use super::client::OpenDataClient;
use super::models::records_from_dump;
use crate::config::ApiConfig;
use crate::yishuv::{Snapshot, locality_level_census, merge};

/// The three datasets merged into the municipality list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Population,
    Census2022,
    Socioeconomic,
}

impl Dataset {
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::Population => "אוכלוסייה לפי גיל",
            Dataset::Census2022 => "מפקד 2022",
            Dataset::Socioeconomic => "מדד חברתי-כלכלי",
        }
    }

    /// File name used by directory dumps
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Population => "population.json",
            Dataset::Census2022 => "census.json",
            Dataset::Socioeconomic => "socio.json",
        }
    }
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all raw records of one dataset
    async fn fetch(&self, dataset: Dataset) -> Result<Vec<Value>>;

    /// Human readable origin, for status messages
    fn describe(&self) -> String;
}

/// Live data.gov.il API
pub struct ApiSource {
    client: OpenDataClient,
    config: ApiConfig,
}

impl ApiSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: OpenDataClient::new(config)?,
            config: config.clone(),
        })
    }

    fn resource_id(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Population => &self.config.population_resource,
            Dataset::Census2022 => &self.config.census_resource,
            Dataset::Socioeconomic => &self.config.socio_resource,
        }
    }
}

#[async_trait]
impl RecordSource for ApiSource {
    async fn fetch(&self, dataset: Dataset) -> Result<Vec<Value>> {
        let resource = self.resource_id(dataset);
        self.client
            .fetch_all(resource, |pct| log::info!("{}: {}%", dataset.label(), pct))
            .await
            .with_context(|| format!("Failed to fetch {}", dataset.label()))
    }

    fn describe(&self) -> String {
        self.config.base_url.clone()
    }
}

/// JSON dumps in a local directory
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl RecordSource for DirectorySource {
    async fn fetch(&self, dataset: Dataset) -> Result<Vec<Value>> {
        let path = self.dir.join(dataset.file_name());
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;

        records_from_dump(value)
            .with_context(|| format!("No record list found in {}", path.display()))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Pick the source configured for this run
pub fn source_from_config(config: &ApiConfig) -> Result<Box<dyn RecordSource>> {
    match &config.data_dir {
        Some(dir) => Ok(Box::new(DirectorySource::new(dir.clone()))),
        None => Ok(Box::new(ApiSource::new(config)?)),
    }
}

/// Raw records of all three datasets
#[derive(Debug, Clone, Default)]
pub struct RawRecords {
    pub population: Vec<Value>,
    pub census: Vec<Value>,
    pub socio: Vec<Value>,
}

/// Fetch the three datasets concurrently. Census rows are reduced to
/// locality level here, before merging.
pub async fn fetch_raw(source: &dyn RecordSource) -> Result<RawRecords> {
    log::info!("Loading 3 datasets from {}", source.describe());

    let (population, census, socio) = tokio::try_join!(
        source.fetch(Dataset::Population),
        source.fetch(Dataset::Census2022),
        source.fetch(Dataset::Socioeconomic),
    )?;

    Ok(RawRecords {
        population,
        census: locality_level_census(census),
        socio,
    })
}

/// Fetch and merge into a snapshot
pub async fn load_snapshot(source: &dyn RecordSource) -> Result<Snapshot> {
    let raw = fetch_raw(source).await?;
    let municipalities = merge(&raw.population, &raw.census, &raw.socio);
    log::info!("Loaded {} municipalities", municipalities.len());
    Ok(Snapshot::new(municipalities))
}
