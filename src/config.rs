use clap::Parser;
use std::path::PathBuf;

use crate::filter::{FilterCriteria, RadiusFilter};
use crate::models::{Coordinate, ListingStatus};
use crate::sources::SourceParams;

/// Command-line configuration; every option can also come from the
/// environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "listing-scout")]
#[command(about = "Fetch property listings and narrow them down with search filters")]
#[command(version)]
pub struct Cli {
    /// Listings API base URL or path to a JSON export
    #[arg(short, long, env = "LISTING_SCOUT_SOURCE")]
    pub source: String,

    /// Listings collection path on the API
    #[arg(long, env = "LISTING_SCOUT_ENDPOINT", default_value = "/properties")]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[arg(long, env = "LISTING_SCOUT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Free-text search over title, description, city and address
    #[arg(short, long)]
    pub query: Option<String>,

    /// Accent-insensitive search over city, address and zip code
    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub price_min: Option<f64>,

    #[arg(long)]
    pub price_max: Option<f64>,

    /// Minimum surface in m²
    #[arg(long)]
    pub surface_min: Option<f64>,

    /// Maximum surface in m²
    #[arg(long)]
    pub surface_max: Option<f64>,

    /// Property type, e.g. "maison"
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// for_sale, for_rent or service
    #[arg(long)]
    pub status: Option<ListingStatus>,

    #[arg(long)]
    pub bedrooms_min: Option<u32>,

    #[arg(long)]
    pub bathrooms_min: Option<u32>,

    /// Radius search center as "lat,lon"
    #[arg(long, requires = "radius_km", allow_hyphen_values = true)]
    pub near: Option<Coordinate>,

    /// Radius search distance in kilometres
    #[arg(long, requires = "near")]
    pub radius_km: Option<f64>,

    /// Write the matching listings as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Build the filter criteria from the command-line options
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new()
            .with_price_range(self.price_min, self.price_max)
            .with_surface_range(self.surface_min, self.surface_max);

        if let Some(query) = &self.query {
            criteria = criteria.with_query(query.as_str());
        }
        if let Some(location) = &self.location {
            criteria = criteria.with_location(location.as_str());
        }
        if let Some(kind) = &self.kind {
            criteria = criteria.with_kind(kind.as_str());
        }
        if let Some(status) = self.status {
            criteria = criteria.with_status(status);
        }
        if let Some(min) = self.bedrooms_min {
            criteria = criteria.with_bedrooms_min(min);
        }
        if let Some(min) = self.bathrooms_min {
            criteria = criteria.with_bathrooms_min(min);
        }
        if let (Some(center), Some(km)) = (self.near, self.radius_km) {
            criteria = criteria.with_radius(RadiusFilter::new(center, km));
        }

        criteria
    }

    pub fn source_params(&self) -> SourceParams {
        SourceParams {
            base_url: self.source.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
            ..SourceParams::default()
        }
    }
}
