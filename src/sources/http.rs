use crate::models::Listing;
use crate::sources::traits::ListingSource;
use crate::sources::types::{decode_listings, SourceParams};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Listings fetched from the REST API
pub struct HttpListingSource {
    client: Client,
    params: SourceParams,
}

impl HttpListingSource {
    /// Create a source for the API at `base_url` with default parameters
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_params(SourceParams::new(base_url))
    }

    /// Create a source with custom parameters
    pub fn with_params(params: SourceParams) -> Result<Self> {
        let client = Client::builder()
            .timeout(params.timeout())
            .user_agent(params.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, params })
    }

    pub fn params(&self) -> &SourceParams {
        &self.params
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        let url = self.params.listings_url();
        info!("Fetching listings from {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            warn!("Listings API returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        debug!("Downloaded {} bytes of JSON", body.len());

        let listings = decode_listings(&body).context("Failed to decode listings payload")?;

        info!("Fetched {} listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
