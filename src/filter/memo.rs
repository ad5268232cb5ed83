use tracing::debug;

use super::criteria::FilterCriteria;
use crate::models::Listing;

/// Listings held for the lifetime of a view, with the last filter pass
/// cached.
///
/// The cache is keyed on `(revision, criteria)`; `replace` bumps the
/// revision so a new fetch always invalidates it.
#[derive(Debug, Default)]
pub struct ListingCatalog {
    listings: Vec<Listing>,
    revision: u64,
    last_pass: Option<CachedPass>,
}

#[derive(Debug)]
struct CachedPass {
    revision: u64,
    criteria: FilterCriteria,
    indices: Vec<usize>,
}

impl ListingCatalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            revision: 0,
            last_pass: None,
        }
    }

    /// Swap in a freshly fetched set of listings
    pub fn replace(&mut self, listings: Vec<Listing>) {
        self.listings = listings;
        self.revision += 1;
        self.last_pass = None;
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings matching `criteria`, recomputed only when the criteria or
    /// the listings changed since the previous call
    pub fn filtered(&mut self, criteria: &FilterCriteria) -> Vec<&Listing> {
        let fresh = self
            .last_pass
            .as_ref()
            .is_some_and(|pass| pass.revision == self.revision && pass.criteria == *criteria);

        if fresh {
            debug!(revision = self.revision, "Reusing cached filter pass");
        } else {
            let indices: Vec<usize> = self
                .listings
                .iter()
                .enumerate()
                .filter(|(_, listing)| criteria.matches(listing))
                .map(|(i, _)| i)
                .collect();
            debug!(
                revision = self.revision,
                total = self.listings.len(),
                matched = indices.len(),
                "Recomputed filter pass"
            );
            self.last_pass = Some(CachedPass {
                revision: self.revision,
                criteria: criteria.clone(),
                indices,
            });
        }

        match &self.last_pass {
            Some(pass) => pass.indices.iter().map(|&i| &self.listings[i]).collect(),
            None => Vec::new(),
        }
    }
}
