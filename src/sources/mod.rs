pub mod file;
pub mod http;
pub mod traits;
pub mod types;

pub use file::JsonFileSource;
pub use http::HttpListingSource;
pub use traits::ListingSource;
pub use types::{decode_listings, SourceParams};

/// Pick the source matching `location`: URLs go to the API, anything else
/// is read as a JSON file.
pub fn from_location(location: &str, params: SourceParams) -> anyhow::Result<Box<dyn ListingSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let params = SourceParams {
            base_url: location.to_string(),
            ..params
        };
        Ok(Box::new(HttpListingSource::with_params(params)?))
    } else {
        Ok(Box::new(JsonFileSource::new(location)))
    }
}
