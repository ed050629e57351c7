//! Directed adjacency index over route records.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{AirportCode, CarrierCode, Route};

/// Marker the OpenFlights feeds use for a missing value.
const NULL_MARKER: &str = "\\N";

/// A route record as handed over by a data source.
///
/// Fields are optional because upstream feeds are noisy; the catalog decides
/// which records are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRecord {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub carrier: Option<String>,
}

impl RouteRecord {
    /// Create a record with all fields present.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        carrier: impl Into<String>,
    ) -> Self {
        Self {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            carrier: Some(carrier.into()),
        }
    }
}

/// Directed route graph keyed by origin airport.
///
/// Built once per data load and read-only afterwards. Keeps both the global
/// load order (the schedule generator numbers routes by it) and, per origin,
/// the outgoing routes in load order. Duplicate routes are retained.
#[derive(Debug, Clone, Default)]
pub struct EdgeCatalog {
    routes: Vec<Route>,
    by_origin: HashMap<AirportCode, Vec<usize>>,
    skipped: usize,
}

impl EdgeCatalog {
    /// Build the catalog from raw records.
    ///
    /// Records with a missing or invalid origin or destination are dropped.
    /// A missing or invalid carrier keeps the route with
    /// [`CarrierCode::UNKNOWN`], since the carrier is display-only.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RouteRecord>,
    {
        let mut catalog = Self::default();

        for record in records {
            let (Some(origin), Some(destination)) = (
                airport_field(record.origin.as_deref()),
                airport_field(record.destination.as_deref()),
            ) else {
                catalog.skipped += 1;
                continue;
            };

            let carrier = present(record.carrier.as_deref())
                .and_then(|c| CarrierCode::parse(c).ok())
                .unwrap_or(CarrierCode::UNKNOWN);

            catalog.push(Route::new(origin, destination, carrier));
        }

        debug!(
            routes = catalog.routes.len(),
            origins = catalog.by_origin.len(),
            skipped = catalog.skipped,
            "built edge catalog"
        );

        catalog
    }

    fn push(&mut self, route: Route) {
        let idx = self.routes.len();
        self.by_origin.entry(route.origin).or_default().push(idx);
        self.routes.push(route);
    }

    /// Outgoing routes from `airport`, in load order. Empty if none.
    pub fn neighbors(&self, airport: &AirportCode) -> impl Iterator<Item = &Route> + '_ {
        self.by_origin
            .get(airport)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.routes[idx])
    }

    /// All routes in load order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes kept.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of distinct origin airports.
    pub fn origin_count(&self) -> usize {
        self.by_origin.len()
    }

    /// Number of records dropped during the build.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns true if any route starts or ends at `airport`.
    pub fn contains_airport(&self, airport: &AirportCode) -> bool {
        self.by_origin.contains_key(airport)
            || self.routes.iter().any(|r| &r.destination == airport)
    }
}

/// A field's trimmed value, or `None` if empty or the null marker.
fn present(field: Option<&str>) -> Option<&str> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != NULL_MARKER)
}

fn airport_field(field: Option<&str>) -> Option<AirportCode> {
    present(field).and_then(|s| AirportCode::parse(s).ok())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn field_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            4 => "[A-E]{3}".prop_map(Some),
            1 => Just(None),
            1 => Just(Some(String::new())),
            1 => Just(Some("\\N".to_string())),
        ]
    }

    fn record_strategy() -> impl Strategy<Value = RouteRecord> {
        (field_strategy(), field_strategy(), "[A-Z]{2}")
            .prop_map(|(origin, destination, carrier)| RouteRecord {
                origin,
                destination,
                carrier: Some(carrier),
            })
    }

    proptest! {
        /// Every record is either kept or counted as skipped
        #[test]
        fn kept_plus_skipped_is_total(records in prop::collection::vec(record_strategy(), 0..40)) {
            let total = records.len();
            let catalog = EdgeCatalog::build(records);
            prop_assert_eq!(catalog.len() + catalog.skipped(), total);
        }

        /// Neighbour lists partition the route set by origin
        #[test]
        fn neighbors_partition_routes(records in prop::collection::vec(record_strategy(), 0..40)) {
            let catalog = EdgeCatalog::build(records);
            let mut counted = 0;
            for route in catalog.routes() {
                let from_origin: Vec<_> = catalog.neighbors(&route.origin).collect();
                prop_assert!(from_origin.iter().all(|r| r.origin == route.origin));
                prop_assert!(from_origin.contains(&route));
            }
            let origins: std::collections::HashSet<_> =
                catalog.routes().iter().map(|r| r.origin).collect();
            for origin in origins {
                counted += catalog.neighbors(&origin).count();
            }
            prop_assert_eq!(counted, catalog.len());
        }
    }
}
