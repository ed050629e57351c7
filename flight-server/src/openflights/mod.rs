//! OpenFlights route data source.
//!
//! Fetches `airports.dat` and `routes.dat` (over HTTP or from a local
//! directory), parses them and builds the [`Catalog`](crate::catalog::Catalog)
//! that every search reads from.

mod client;
mod error;
mod parse;

pub use client::{
    AIRPORTS_FILE, CatalogLoader, DEFAULT_AIRPORTS_URL, DEFAULT_ROUTES_URL, DataSource,
    LoaderConfig, ROUTES_FILE,
};
pub use error::LoadError;
pub use parse::{parse_airports, parse_routes};
