use crate::models::Listing;
use crate::sources::traits::ListingSource;
use crate::sources::types::decode_listings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Listings read from a JSON export (same shapes as the API)
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let listings = decode_listings(&raw)
            .with_context(|| format!("Failed to parse listings from {}", self.path.display()))?;

        info!("Loaded {} listings from {}", listings.len(), self.path.display());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
