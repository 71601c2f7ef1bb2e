//! HTTP client for the data.gov.il datastore

use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;

use super::constants::USER_AGENT;
use super::models::DatastoreResponse;
use crate::config::ApiConfig;

/// Percentage of a paged download that is done after `offset` records
pub fn page_progress(offset: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((offset as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

#[derive(Debug, Clone)]
pub struct OpenDataClient {
    http: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl OpenDataClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        })
    }

    /// Fetch one page of a resource
    pub async fn fetch_page(&self, resource_id: &str, offset: usize) -> Result<DatastoreResponse> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("resource_id", resource_id.to_string()),
                ("limit", self.page_size.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Request for resource {} failed", resource_id))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("API {}", status.as_u16());
        }

        let body = response
            .json::<DatastoreResponse>()
            .await
            .with_context(|| format!("Invalid datastore response for resource {}", resource_id))?;

        if !body.success {
            anyhow::bail!("Datastore reported failure for resource {}", resource_id);
        }
        Ok(body)
    }

    /// Fetch every record of a resource, page by page.
    /// `on_progress` receives the completion percentage after each page.
    pub async fn fetch_all<F>(&self, resource_id: &str, mut on_progress: F) -> Result<Vec<Value>>
    where
        F: FnMut(u8) + Send,
    {
        let mut records = Vec::new();
        let mut offset = 0;
        let mut total = usize::MAX;

        while offset < total {
            let page = self.fetch_page(resource_id, offset).await?;
            total = page.result.total;
            records.extend(page.result.records);
            offset += self.page_size;
            on_progress(page_progress(offset, total));
        }

        log::debug!("Fetched {} records from resource {}", records.len(), resource_id);
        Ok(records)
    }
}
