//! Catalog load error types.

use std::path::PathBuf;

use crate::catalog::CatalogError;

/// Errors that can occur while loading route data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Reading a local data file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data was fetched but contains no usable routes
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
