use crate::models::Listing;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Connection parameters for the listings API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceParams {
    /// API root, e.g. `https://api.example.com`
    pub base_url: String,
    /// Path of the listings collection
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl SourceParams {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the listings collection
    pub fn listings_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceParams {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            endpoint: "/properties".to_string(),
            timeout_secs: 30,
            user_agent: concat!("listing-scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Decode a listings body: a bare JSON array or an envelope
/// `{ "data": [...] }`.
///
/// Records are converted one at a time; a record that does not fit the
/// listing shape is logged and skipped so the rest of the payload survives.
pub fn decode_listings(raw: &[u8]) -> Result<Vec<Listing>> {
    let body: Value = serde_json::from_slice(raw).context("Listings body is not valid JSON")?;

    let records = match body {
        Value::Array(records) => records,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => records,
            Some(other) => bail!("Expected 'data' to be an array, got {}", kind_of(&other)),
            None => bail!("Expected a listings array or an object with a 'data' array"),
        },
        other => bail!("Expected a listings array, got {}", kind_of(&other)),
    };

    let total = records.len();
    let listings: Vec<Listing> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Listing>(record) {
            Ok(listing) => Some(listing),
            Err(err) => {
                warn!("Skipping listing #{}: {}", index, err);
                None
            }
        })
        .collect();

    if listings.len() < total {
        warn!("Kept {} of {} listing records", listings.len(), total);
    }
    Ok(listings)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
