//! Server configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::openflights::{DEFAULT_AIRPORTS_URL, DEFAULT_ROUTES_URL, DataSource, LoaderConfig};
use crate::planner::SearchConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

pub const ENV_BIND_ADDR: &str = "FLIGHT_BIND_ADDR";
pub const ENV_DATA_DIR: &str = "FLIGHT_DATA_DIR";
pub const ENV_AIRPORTS_URL: &str = "FLIGHT_AIRPORTS_URL";
pub const ENV_ROUTES_URL: &str = "FLIGHT_ROUTES_URL";
pub const ENV_SCHEDULE_SEED: &str = "FLIGHT_SCHEDULE_SEED";
pub const ENV_MAX_STATES: &str = "FLIGHT_MAX_STATES";

/// Everything the binary needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Where route data is loaded from
    pub source: DataSource,

    /// Itinerary search settings
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// Unset or empty variables take their defaults. Values that fail to
    /// parse are logged and also fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parsed(ENV_BIND_ADDR, get(ENV_BIND_ADDR)).unwrap_or(DEFAULT_BIND_ADDR);

        let source = match get(ENV_DATA_DIR) {
            Some(dir) => DataSource::Directory(PathBuf::from(dir)),
            None => DataSource::Http {
                airports_url: get(ENV_AIRPORTS_URL)
                    .unwrap_or_else(|| DEFAULT_AIRPORTS_URL.to_string()),
                routes_url: get(ENV_ROUTES_URL).unwrap_or_else(|| DEFAULT_ROUTES_URL.to_string()),
            },
        };

        let mut search = SearchConfig::default();
        if let Some(seed) = parsed(ENV_SCHEDULE_SEED, get(ENV_SCHEDULE_SEED)) {
            search = search.with_seed(seed);
        }
        if let Some(max_states) = parsed(ENV_MAX_STATES, get(ENV_MAX_STATES)) {
            search = search.with_max_states(max_states);
        }

        Self {
            bind_addr,
            source,
            search,
        }
    }

    /// Loader settings for the configured data source.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new(self.source.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parsed<T>(key: &str, value: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = value?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, value = %value, error = %e, "ignoring invalid setting, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.source, DataSource::default());
        assert_eq!(config.search.schedule_seed, None);
        assert_eq!(config.search.max_states, SearchConfig::default().max_states);
    }

    #[test]
    fn data_dir_overrides_urls() {
        let config = from_map(&[
            (ENV_DATA_DIR, "/srv/openflights"),
            (ENV_AIRPORTS_URL, "http://example.invalid/a.dat"),
        ]);
        assert_eq!(config.source, DataSource::directory("/srv/openflights"));
    }

    #[test]
    fn custom_urls() {
        let config = from_map(&[(ENV_ROUTES_URL, "http://localhost:8080/routes.dat")]);
        assert_eq!(
            config.source,
            DataSource::Http {
                airports_url: DEFAULT_AIRPORTS_URL.to_string(),
                routes_url: "http://localhost:8080/routes.dat".to_string(),
            }
        );
    }

    #[test]
    fn numeric_settings() {
        let config = from_map(&[
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_SCHEDULE_SEED, "42"),
            (ENV_MAX_STATES, " 1000 "),
        ]);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.search.schedule_seed, Some(42));
        assert_eq!(config.search.max_states, 1000);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = from_map(&[
            (ENV_BIND_ADDR, "not an address"),
            (ENV_SCHEDULE_SEED, "-3"),
            (ENV_MAX_STATES, "lots"),
            (ENV_DATA_DIR, "   "),
        ]);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.search.schedule_seed, None);
        assert_eq!(config.search.max_states, SearchConfig::default().max_states);
        assert_eq!(config.source, DataSource::default());
    }
}
