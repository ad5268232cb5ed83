use tracing::debug;

use super::criteria::FilterCriteria;
use super::normalize::normalize_location;
use crate::models::Listing;

/// Narrow `listings` to those matching every active criterion.
///
/// Relative order is preserved and the input is left untouched. Listings
/// missing a field an active predicate needs are dropped, never reported.
pub fn filter_listings<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    let matched: Vec<&Listing> = listings.iter().filter(|l| criteria.matches(l)).collect();

    debug!(
        total = listings.len(),
        matched = matched.len(),
        active_filters = criteria.active_count(),
        "Filtered listings"
    );

    matched
}

impl FilterCriteria {
    /// Whether a single listing passes every active predicate
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_text(listing)
            && self.matches_location(listing)
            && self.matches_radius(listing)
            && in_range(listing.price, self.price_min, self.price_max)
            && in_range(listing.surface, self.surface_min, self.surface_max)
            && self.matches_kind(listing)
            && self.status.map_or(true, |s| listing.status == Some(s))
            && self
                .bedrooms_min
                .map_or(true, |min| listing.effective_bedrooms() >= f64::from(min))
            && self
                .bathrooms_min
                .map_or(true, |min| listing.effective_bathrooms() >= f64::from(min))
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        let Some(query) = self.text_query() else {
            return true;
        };
        let query = query.to_lowercase();

        [&listing.title, &listing.description, &listing.city, &listing.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        let Some(query) = self.location_query() else {
            return true;
        };
        let query = normalize_location(query);
        if query.is_empty() {
            // Pure punctuation folds to nothing and cannot narrow results
            return true;
        }

        let city = normalize_location(&listing.city);
        let address = normalize_location(&listing.address);
        let zip = normalize_location(&listing.zip_code);

        // Field in query as well as query in field: the stored value may be
        // more or less specific than what was typed.
        contains(&city, &query)
            || contains(&address, &query)
            || contains(&zip, &query)
            || contains(&query, &city)
            || contains(&query, &address)
    }

    fn matches_radius(&self, listing: &Listing) -> bool {
        let Some(radius) = self.active_radius() else {
            return true;
        };
        match listing.coordinate() {
            // NaN distances compare false and drop the listing
            Some(position) => radius.center.distance_km(&position) <= radius.km,
            None => false,
        }
    }

    fn matches_kind(&self, listing: &Listing) -> bool {
        let Some(kind) = self.kind_filter() else {
            return true;
        };
        listing
            .kind
            .as_deref()
            .is_some_and(|k| k.to_lowercase().contains(&kind.to_lowercase()))
    }
}

/// Inclusive bounds; a missing value fails any set bound
fn in_range(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if let Some(min) = min {
        if !matches!(value, Some(v) if v >= min) {
            return false;
        }
    }
    if let Some(max) = max {
        if !matches!(value, Some(v) if v <= max) {
            return false;
        }
    }
    true
}

/// Substring test where a blank haystack or needle never matches
fn contains(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && !needle.is_empty() && haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RadiusFilter;
    use crate::models::{Coordinate, ListingStatus};

    fn listing(id: &str) -> Listing {
        Listing::new(id)
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything_in_order() {
        let listings = vec![listing("c"), listing("a"), listing("b")];
        let result = filter_listings(&listings, &FilterCriteria::new());
        assert_eq!(ids(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_text_query_any_field() {
        let mut a = listing("a");
        a.title = "Villa avec piscine".into();
        let mut b = listing("b");
        b.description = "Belle VILLA rénovée".into();
        let mut c = listing("c");
        c.address = "12 chemin des Villas".into();
        let mut d = listing("d");
        d.zip_code = "villa".into();

        let listings = vec![a, b, c, d];
        let criteria = FilterCriteria::new().with_query("Villa");
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_location_matches_zip_and_bidirectional() {
        let mut a = listing("a");
        a.zip_code = "97400".into();
        let mut b = listing("b");
        b.city = "Saint-Pierre".into();
        let mut c = listing("c");
        c.city = "Denis".into();

        let listings = vec![a, b, c];

        let zip = FilterCriteria::new().with_location("974");
        assert_eq!(ids(&filter_listings(&listings, &zip)), vec!["a"]);

        let longer = FilterCriteria::new().with_location("Saint-Pierre, La Réunion");
        assert_eq!(ids(&filter_listings(&listings, &longer)), vec!["b"]);

        let both = FilterCriteria::new().with_location("saint-denis-reunion");
        assert_eq!(ids(&filter_listings(&listings, &both)), vec!["c"]);
    }

    #[test]
    fn test_blank_fields_do_not_match_location_in_reverse() {
        let listings = vec![listing("empty")];
        let criteria = FilterCriteria::new().with_location("anything");
        assert!(filter_listings(&listings, &criteria).is_empty());
    }

    #[test]
    fn test_price_bounds_are_inclusive_and_require_value() {
        let mut low = listing("low");
        low.price = Some(100.0);
        let mut high = listing("high");
        high.price = Some(200.0);
        let mut below = listing("below");
        below.price = Some(99.0);
        let unpriced = listing("unpriced");
        let mut nan = listing("nan");
        nan.price = Some(f64::NAN);

        let listings = vec![low, high, below, unpriced, nan];
        let criteria = FilterCriteria::new().with_price_range(Some(100.0), Some(200.0));
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["low", "high"]);

        let only_max = FilterCriteria::new().with_price_max(150.0);
        assert_eq!(ids(&filter_listings(&listings, &only_max)), vec!["low", "below"]);
    }

    #[test]
    fn test_surface_range() {
        let mut small = listing("small");
        small.surface = Some(30.0);
        let mut big = listing("big");
        big.surface = Some(120.0);

        let listings = vec![small, big];
        let criteria = FilterCriteria::new().with_surface_range(Some(50.0), None);
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["big"]);
    }

    #[test]
    fn test_surface_max_is_inclusive() {
        let mut at_max = listing("at_max");
        at_max.surface = Some(80.0);
        let mut over = listing("over");
        over.surface = Some(80.5);
        let mut under = listing("under");
        under.surface = Some(45.0);

        let listings = vec![at_max, over, under];
        let criteria = FilterCriteria::new().with_surface_range(None, Some(80.0));
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["at_max", "under"]);
    }

    #[test]
    fn test_nan_and_negative_surface_fail_active_bounds() {
        let mut nan = listing("nan");
        nan.surface = Some(f64::NAN);
        let mut negative = listing("negative");
        negative.surface = Some(-20.0);
        let mut normal = listing("normal");
        normal.surface = Some(60.0);

        let listings = vec![nan, negative, normal];

        let min_only = FilterCriteria::new().with_surface_range(Some(0.0), None);
        assert_eq!(ids(&filter_listings(&listings, &min_only)), vec!["normal"]);

        // Negative values pass a max-only bound as-is; NaN never does
        let max_only = FilterCriteria::new().with_surface_range(None, Some(100.0));
        assert_eq!(ids(&filter_listings(&listings, &max_only)), vec!["negative", "normal"]);

        // No surface bound, nothing dropped
        assert_eq!(filter_listings(&listings, &FilterCriteria::new()).len(), 3);
    }

    #[test]
    fn test_negative_and_fractional_counts_compare_as_is() {
        let mut negative = listing("negative");
        negative.bedrooms = Some(-1.0);
        let mut half = listing("half");
        half.rooms = Some(2.5);
        let mut three = listing("three");
        three.bedrooms = Some(3.0);

        let listings = vec![negative, half, three];

        let two = FilterCriteria::new().with_bedrooms_min(2);
        assert_eq!(ids(&filter_listings(&listings, &two)), vec!["half", "three"]);

        let zero = FilterCriteria::new().with_bedrooms_min(0);
        assert_eq!(ids(&filter_listings(&listings, &zero)), vec!["half", "three"]);
    }

    #[test]
    fn test_whitespace_kind_does_not_filter() {
        let mut house = listing("house");
        house.kind = Some("maison".into());
        let untyped = listing("untyped");

        let listings = vec![house, untyped];
        let criteria = FilterCriteria::new().with_kind("   ");
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["house", "untyped"]);
    }

    #[test]
    fn test_kind_substring_case_insensitive() {
        let mut house = listing("house");
        house.kind = Some("Maison de ville".into());
        let mut flat = listing("flat");
        flat.kind = Some("appartement".into());
        let untyped = listing("untyped");

        let listings = vec![house, flat, untyped];
        let criteria = FilterCriteria::new().with_kind("MAISON");
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["house"]);
    }

    #[test]
    fn test_status_equality() {
        let mut sale = listing("sale");
        sale.status = Some(ListingStatus::ForSale);
        let mut rent = listing("rent");
        rent.status = Some(ListingStatus::ForRent);
        let unknown = listing("unknown");

        let listings = vec![sale, rent, unknown];
        let criteria = FilterCriteria::new().with_status(ListingStatus::ForRent);
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["rent"]);
    }

    #[test]
    fn test_bedrooms_fallback_and_bathrooms_default() {
        let mut by_rooms = listing("rooms");
        by_rooms.rooms = Some(3.0);
        let mut by_bedrooms = listing("bedrooms");
        by_bedrooms.bedrooms = Some(1.0);
        by_bedrooms.rooms = Some(4.0);
        let none = listing("none");

        let listings = vec![by_rooms, by_bedrooms, none];
        let criteria = FilterCriteria::new().with_bedrooms_min(2);
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["rooms"]);

        let zero_baths = FilterCriteria::new().with_bathrooms_min(0);
        assert_eq!(filter_listings(&listings, &zero_baths).len(), 3);

        let one_bath = FilterCriteria::new().with_bathrooms_min(1);
        assert!(filter_listings(&listings, &one_bath).is_empty());
    }

    #[test]
    fn test_radius_excludes_missing_or_nan_coordinates() {
        let mut here = listing("here");
        here.latitude = Some(0.0);
        here.longitude = Some(0.0);
        let mut half = listing("half");
        half.latitude = Some(0.0);
        let mut nan = listing("nan");
        nan.latitude = Some(f64::NAN);
        nan.longitude = Some(0.0);

        let listings = vec![here, half, nan];
        let criteria = FilterCriteria::new()
            .with_radius(RadiusFilter::new(Coordinate::new(0.0, 0.0), 20_000.0));
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec!["here"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let mut a = listing("a");
        a.price = Some(10.0);
        let listings = vec![a.clone()];
        let _ = filter_listings(&listings, &FilterCriteria::new().with_price_min(50.0));
        assert_eq!(listings, vec![a]);
    }
}
