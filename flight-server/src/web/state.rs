//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::planner::{DurationPolicy, SearchConfig};

/// Shared application state.
///
/// Everything here is read-only after startup, so concurrent searches share
/// it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Route graph and airport directory
    pub catalog: Arc<Catalog>,

    /// Itinerary search configuration
    pub config: Arc<SearchConfig>,

    /// Flight duration policy used when scheduling each search
    pub durations: Arc<dyn DurationPolicy>,
}

impl AppState {
    /// Create a new app state, picking the duration policy from the config.
    pub fn new(catalog: Catalog, config: SearchConfig) -> Self {
        let durations = config.duration_policy();
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            durations,
        }
    }

    /// Replace the duration policy.
    pub fn with_durations(mut self, durations: Arc<dyn DurationPolicy>) -> Self {
        self.durations = durations;
        self
    }
}
