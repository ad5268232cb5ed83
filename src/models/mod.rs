use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::filter::geo;

/// Identifier of a listing as the backend sends it (string or number)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ListingId {
    /// Any JSON number, negative or fractional included
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for ListingId {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Commercial status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    ForSale,
    ForRent,
    Service,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForSale => "for_sale",
            Self::ForRent => "for_rent",
            Self::Service => "service",
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "for_sale" | "sale" => Ok(Self::ForSale),
            "for_rent" | "rent" => Ok(Self::ForRent),
            "service" => Ok(Self::Service),
            other => anyhow::bail!("Unknown listing status: {other}"),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within the latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in kilometres
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        geo::haversine_km(self, other)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = anyhow::Error;

    /// Parses `"lat,lon"`
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let Some((lat, lon)) = s.split_once(',') else {
            anyhow::bail!("Expected coordinate as 'lat,lon', got '{s}'");
        };
        let coordinate = Coordinate::new(lat.trim().parse()?, lon.trim().parse()?);
        if !coordinate.is_valid() {
            anyhow::bail!("Coordinate out of range: {s}");
        }
        Ok(coordinate)
    }
}

/// Property listing as delivered by the listings API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zip_code: String,
    /// Free-form property type ("maison", "appartement", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Area in m²
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, alias = "lat", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(
        default,
        alias = "lng",
        alias = "lon",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Create a listing with only an id; every other field is empty
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            city: String::new(),
            address: String::new(),
            zip_code: String::new(),
            kind: None,
            status: None,
            price: None,
            surface: None,
            bedrooms: None,
            rooms: None,
            bathrooms: None,
            latitude: None,
            longitude: None,
            created_at: None,
        }
    }

    /// Position of the listing, if both coordinates are known
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }

    /// Bedrooms, falling back to the rooms count.
    ///
    /// Counts are kept as sent; negative or fractional values reach the
    /// minimum comparisons unchanged.
    pub fn effective_bedrooms(&self) -> f64 {
        self.bedrooms.or(self.rooms).unwrap_or(0.0)
    }

    pub fn effective_bathrooms(&self) -> f64 {
        self.bathrooms.unwrap_or(0.0)
    }
}

/// `null` reads as the type's default (empty string for text fields)
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
