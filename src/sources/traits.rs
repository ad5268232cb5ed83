use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can supply listings
/// (the listings REST API, an exported JSON file, ...)
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the full listing collection
    async fn fetch(&self) -> Result<Vec<Listing>>;

    /// Get the name of the source, for logs
    fn source_name(&self) -> &'static str;
}
