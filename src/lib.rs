//! Listing search over property catalogs fetched from a listings API.
//!
//! [`filter_listings`] narrows listings by free text, location, distance,
//! price, surface, type, status and room counts. [`ListingCatalog`] keeps
//! a fetched set around and caches the last pass.

pub mod config;
pub mod filter;
pub mod models;
pub mod sources;

pub use filter::{filter_listings, FilterCriteria, ListingCatalog, RadiusFilter};
pub use models::{Coordinate, Listing, ListingId, ListingStatus};
