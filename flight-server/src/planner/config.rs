//! Search configuration for the itinerary planner.

use std::sync::Arc;

use chrono::Duration;

use super::schedule::{DurationPolicy, RandomDurations, SeededDurations};
use super::search::SearchBudget;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of itineraries returned when the caller doesn't ask for a count.
    pub default_results: usize,

    /// Upper bound on the number of itineraries returned in one view.
    pub max_results: usize,

    /// Largest duration budget (hours) a request may ask for.
    /// Path counts grow quickly with the window, so this is capped.
    pub max_window_hours: i64,

    /// Maximum number of search states dequeued before giving up.
    pub max_states: usize,

    /// Wall-clock limit for one enumeration (seconds).
    pub search_timeout_secs: u64,

    /// Shortest generated flight (minutes).
    pub min_flight_mins: i64,

    /// Longest generated flight (minutes, exclusive).
    pub max_flight_mins: i64,

    /// Seed for flight durations. `None` draws fresh durations per search.
    pub schedule_seed: Option<u64>,

    /// Repeat each route's departure every 24 hours within the window.
    pub daily_repeat: bool,
}

impl SearchConfig {
    /// Set the schedule seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.schedule_seed = Some(seed);
        self
    }

    /// Set the state budget.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Returns the maximum request window as a Duration.
    pub fn max_window(&self) -> Duration {
        Duration::hours(self.max_window_hours)
    }

    /// Returns the generated flight duration bounds.
    pub fn flight_duration_bounds(&self) -> (Duration, Duration) {
        (
            Duration::minutes(self.min_flight_mins),
            Duration::minutes(self.max_flight_mins),
        )
    }

    /// Returns the cooperative cancellation budget for one enumeration.
    pub fn budget(&self) -> SearchBudget {
        SearchBudget::new(
            Some(self.max_states),
            Some(std::time::Duration::from_secs(self.search_timeout_secs)),
        )
    }

    /// Build the flight duration policy: seeded when a seed is configured,
    /// otherwise free-running.
    pub fn duration_policy(&self) -> Arc<dyn DurationPolicy> {
        let (min, max) = self.flight_duration_bounds();
        match self.schedule_seed {
            Some(seed) => Arc::new(SeededDurations::new(seed, min, max)),
            None => Arc::new(RandomDurations::new(min, max)),
        }
    }

    /// Clamp a requested result count to `1..=max_results`, using the default when absent.
    pub fn result_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_results)
            .clamp(1, self.max_results.max(1))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_results: 5,
            max_results: 50,
            max_window_hours: 168, // one week
            max_states: 200_000,
            search_timeout_secs: 10,
            min_flight_mins: 120, // 2 hours
            max_flight_mins: 600, // 10 hours
            schedule_seed: None,
            daily_repeat: true,
        }
    }
}
