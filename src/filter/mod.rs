pub mod criteria;
pub mod engine;
pub mod geo;
pub mod memo;
pub mod normalize;

pub use criteria::{FilterCriteria, RadiusFilter};
pub use engine::filter_listings;
pub use memo::ListingCatalog;
