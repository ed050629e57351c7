//! OpenFlights data loader.

use std::path::PathBuf;

use tracing::info;

use super::error::LoadError;
use super::parse::{parse_airports, parse_routes};
use crate::catalog::Catalog;

/// Default airports URL (OpenFlights on GitHub).
pub const DEFAULT_AIRPORTS_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/airports.dat";

/// Default routes URL (OpenFlights on GitHub).
pub const DEFAULT_ROUTES_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/routes.dat";

/// File names expected in a local data directory.
pub const AIRPORTS_FILE: &str = "airports.dat";
pub const ROUTES_FILE: &str = "routes.dat";

/// Where to read route data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fetch both files over HTTP.
    Http {
        airports_url: String,
        routes_url: String,
    },
    /// Read `airports.dat` and `routes.dat` from a directory.
    Directory(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Http {
            airports_url: DEFAULT_AIRPORTS_URL.to_string(),
            routes_url: DEFAULT_ROUTES_URL.to_string(),
        }
    }
}

impl DataSource {
    /// Read from a local directory.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }
}

/// Configuration for the catalog loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Where the data comes from
    pub source: DataSource,
    /// Request timeout in seconds (HTTP only)
    pub timeout_secs: u64,
}

impl LoaderConfig {
    /// Create a config for the given source with the default timeout.
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            timeout_secs: 60,
        }
    }

    /// Set a custom timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DataSource::default())
    }
}

/// Loads airport and route data and builds the catalog.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    http: reqwest::Client,
    source: DataSource,
}

impl CatalogLoader {
    /// Create a new loader.
    pub fn new(config: LoaderConfig) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            source: config.source,
        })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch both files, parse them and build the catalog.
    ///
    /// Completes only once both files are in hand; a catalog is never built
    /// from one file alone.
    pub async fn load(&self) -> Result<Catalog, LoadError> {
        let (airports, routes) = match &self.source {
            DataSource::Http {
                airports_url,
                routes_url,
            } => {
                futures::try_join!(self.fetch(airports_url), self.fetch(routes_url))?
            }
            DataSource::Directory(dir) => futures::try_join!(
                read_file(dir.join(AIRPORTS_FILE)),
                read_file(dir.join(ROUTES_FILE))
            )?,
        };

        let airport_records = parse_airports(&airports);
        let route_records = parse_routes(&routes);
        let record_count = route_records.len();

        let catalog = Catalog::from_records(route_records, airport_records)?;

        info!(
            airports = catalog.airports().len(),
            routes = catalog.routes().len(),
            origins = catalog.routes().origin_count(),
            skipped = catalog.routes().skipped(),
            records = record_count,
            "loaded route catalog"
        );

        Ok(catalog)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        info!(url, "fetching route data");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

async fn read_file(path: PathBuf) -> Result<Vec<u8>, LoadError> {
    info!(path = %path.display(), "reading route data");
    tokio::fs::read(&path)
        .await
        .map_err(|source| LoadError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use std::path::Path;
    use tempfile::tempdir;

    const AIRPORTS: &str = "\
3797,\"John F Kennedy International Airport\",\"New York\",\"United States\",\"JFK\",\"KJFK\"
3484,\"Los Angeles International Airport\",\"Los Angeles\",\"United States\",\"LAX\",\"KLAX\"
";

    const ROUTES: &str = "\
AA,24,JFK,3797,LAX,3484,,0,321
DL,2009,LAX,3484,JFK,3797,,0,757
";

    fn write_data(dir: &Path, airports: &str, routes: &str) {
        std::fs::write(dir.join(AIRPORTS_FILE), airports).unwrap();
        std::fs::write(dir.join(ROUTES_FILE), routes).unwrap();
    }

    fn loader(dir: &Path) -> CatalogLoader {
        CatalogLoader::new(LoaderConfig::new(DataSource::directory(dir))).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(
            config.source,
            DataSource::Http {
                airports_url: DEFAULT_AIRPORTS_URL.to_string(),
                routes_url: DEFAULT_ROUTES_URL.to_string(),
            }
        );
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.with_timeout_secs(5).timeout_secs, 5);
    }

    #[tokio::test]
    async fn loads_from_directory() {
        let dir = tempdir().unwrap();
        write_data(dir.path(), AIRPORTS, ROUTES);

        let catalog = loader(dir.path()).load().await.unwrap();

        assert_eq!(catalog.routes().len(), 2);
        assert_eq!(catalog.airports().len(), 2);
        let jfk = crate::domain::AirportCode::parse("JFK").unwrap();
        assert_eq!(catalog.routes().neighbors(&jfk).count(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(AIRPORTS_FILE), AIRPORTS).unwrap();

        let err = loader(dir.path()).load().await.unwrap_err();
        match err {
            LoadError::Io { path, .. } => assert!(path.ends_with(ROUTES_FILE)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_usable_routes_is_refused() {
        let dir = tempdir().unwrap();
        write_data(dir.path(), AIRPORTS, "AA,24,\\N,\\N,LAX,3484,,0,321\n");

        let err = loader(dir.path()).load().await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Catalog(CatalogError::NoRoutes { skipped: 1 })
        ));
    }

    #[tokio::test]
    async fn missing_airports_still_loads_routes() {
        let dir = tempdir().unwrap();
        write_data(dir.path(), "", ROUTES);

        let catalog = loader(dir.path()).load().await.unwrap();
        assert_eq!(catalog.routes().len(), 2);
        assert!(catalog.airports().is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let source = DataSource::Http {
            airports_url: "http://127.0.0.1:1/airports.dat".to_string(),
            routes_url: "http://127.0.0.1:1/routes.dat".to_string(),
        };
        let loader =
            CatalogLoader::new(LoaderConfig::new(source).with_timeout_secs(2)).unwrap();

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Http(_)));
    }
}
