//! Route and airport catalog.
//!
//! The catalog is produced once per data load by a pure build step and is
//! read-only afterwards, so it can be shared between concurrent searches.

mod airports;
mod edges;

pub use airports::{AirportDirectory, AirportRecord};
pub use edges::{EdgeCatalog, RouteRecord};

/// Error building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No usable route records were supplied
    #[error("route data contains no usable routes ({skipped} records skipped)")]
    NoRoutes { skipped: usize },
}

/// Immutable route graph plus airport display data.
#[derive(Debug, Clone)]
pub struct Catalog {
    routes: EdgeCatalog,
    airports: AirportDirectory,
}

impl Catalog {
    /// Bundle a route graph with its airport directory.
    ///
    /// An empty route graph is refused, so that "no catalog" can never be
    /// mistaken for "no matching itineraries".
    pub fn new(routes: EdgeCatalog, airports: AirportDirectory) -> Result<Self, CatalogError> {
        if routes.is_empty() {
            return Err(CatalogError::NoRoutes {
                skipped: routes.skipped(),
            });
        }

        Ok(Self { routes, airports })
    }

    /// Build a catalog directly from records.
    pub fn from_records<R, A>(routes: R, airports: A) -> Result<Self, CatalogError>
    where
        R: IntoIterator<Item = RouteRecord>,
        A: IntoIterator<Item = AirportRecord>,
    {
        Self::new(EdgeCatalog::build(routes), AirportDirectory::build(airports))
    }

    pub fn routes(&self) -> &EdgeCatalog {
        &self.routes
    }

    pub fn airports(&self) -> &AirportDirectory {
        &self.airports
    }
}
