use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, ListingStatus};

/// Radius constraint around a center point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    pub center: Coordinate,
    pub km: f64,
    /// The radius can be toggled off without losing its value
    pub enabled: bool,
}

impl RadiusFilter {
    pub fn new(center: Coordinate, km: f64) -> Self {
        Self {
            center,
            km,
            enabled: true,
        }
    }

    /// Only an enabled radius with a positive distance constrains results
    pub fn is_active(&self) -> bool {
        self.enabled && self.km > 0.0
    }
}

/// User-selected constraints for one filter pass.
///
/// Criteria are rebuilt with the `with_*` methods on every change and are
/// only ever read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Matched against title, description, city and address
    pub query: Option<String>,
    /// Matched against normalized city, address and zip code
    pub location: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub surface_min: Option<f64>,
    pub surface_max: Option<f64>,
    /// Substring of the listing type
    pub kind: Option<String>,
    pub status: Option<ListingStatus>,
    pub bedrooms_min: Option<u32>,
    pub bathrooms_min: Option<u32>,
    pub radius: Option<RadiusFilter>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_price_min(mut self, min: f64) -> Self {
        self.price_min = Some(min);
        self
    }

    pub fn with_price_max(mut self, max: f64) -> Self {
        self.price_max = Some(max);
        self
    }

    pub fn with_surface_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.surface_min = min;
        self.surface_max = max;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_bedrooms_min(mut self, min: u32) -> Self {
        self.bedrooms_min = Some(min);
        self
    }

    pub fn with_bathrooms_min(mut self, min: u32) -> Self {
        self.bathrooms_min = Some(min);
        self
    }

    pub fn with_radius(mut self, radius: RadiusFilter) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Trimmed free-text query, `None` when blank
    pub fn text_query(&self) -> Option<&str> {
        non_blank(self.query.as_deref())
    }

    /// Trimmed location query, `None` when blank
    pub fn location_query(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    /// Trimmed type filter, `None` when blank.
    ///
    /// A whitespace-only type counts as unset, like a blank search box; it
    /// would otherwise only match types containing that whitespace.
    pub fn kind_filter(&self) -> Option<&str> {
        non_blank(self.kind.as_deref())
    }

    pub fn active_radius(&self) -> Option<&RadiusFilter> {
        self.radius.as_ref().filter(|r| r.is_active())
    }

    /// Number of criteria that currently restrict results (the "active
    /// filters" badge)
    pub fn active_count(&self) -> usize {
        [
            self.text_query().is_some(),
            self.location_query().is_some(),
            self.active_radius().is_some(),
            self.price_min.is_some(),
            self.price_max.is_some(),
            self.surface_min.is_some(),
            self.surface_max.is_some(),
            self.kind_filter().is_some(),
            self.status.is_some(),
            self.bedrooms_min.is_some(),
            self.bathrooms_min.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
