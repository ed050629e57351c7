//! Breadth-first itinerary search.
//!
//! Enumerates every simple path from the source to the destination over a
//! set of scheduled flights, where each leg departs no earlier than the
//! previous leg arrived and no later than the request's duration budget.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;
use tracing::{debug, trace, warn};

use crate::catalog::Catalog;
use crate::domain::{AirportCode, FlightInstance, FlightTime, Itinerary};

use super::config::SearchConfig;
use super::rank::RankedItineraries;
use super::schedule::{DurationPolicy, ScheduleGenerator};

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Request for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Airport the trip starts from.
    pub source: AirportCode,

    /// Airport the trip ends at.
    pub destination: AirportCode,

    /// Earliest allowed departure; total elapsed time is measured from here.
    pub start: FlightTime,

    /// Duration budget in hours. Flights departing later than this after
    /// `start` are not used.
    pub max_hours: i64,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        source: AirportCode,
        destination: AirportCode,
        start: FlightTime,
        max_hours: i64,
    ) -> Self {
        Self {
            source,
            destination,
            start,
            max_hours,
        }
    }

    /// Validate the search request against the configured limits.
    pub fn validate(&self, config: &SearchConfig) -> Result<(), SearchError> {
        if self.max_hours < 0 {
            return Err(SearchError::InvalidRequest(
                "duration must not be negative".to_string(),
            ));
        }

        if self.max_hours > config.max_window_hours {
            return Err(SearchError::InvalidRequest(format!(
                "duration must be at most {} hours",
                config.max_window_hours
            )));
        }

        Ok(())
    }
}

/// Cooperative limits on one enumeration.
///
/// `max_states` caps every state the search creates, queued or explored, so
/// it bounds memory as well as work. The deadline is checked once per
/// dequeued state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBudget {
    max_states: Option<usize>,
    deadline: Option<std::time::Duration>,
}

impl SearchBudget {
    pub fn new(max_states: Option<usize>, deadline: Option<std::time::Duration>) -> Self {
        Self {
            max_states,
            deadline,
        }
    }

    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    fn exhausted(&self, states_explored: usize, started: Instant) -> bool {
        if self.max_states.is_some_and(|max| states_explored >= max) {
            return true;
        }
        self.deadline.is_some_and(|limit| started.elapsed() >= limit)
    }

    /// Whether one more state may be created when `created` already exist.
    fn admits(&self, created: usize) -> bool {
        self.max_states.is_none_or(|max| created < max)
    }
}

/// Outcome of one enumeration.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Completed itineraries in discovery order.
    pub itineraries: Vec<Itinerary>,

    /// Number of states dequeued.
    pub states_explored: usize,

    /// Largest number of states waiting in the queue at once.
    pub peak_frontier: usize,

    /// True if the budget ran out before the frontier emptied.
    pub truncated: bool,
}

/// Flights grouped by origin, each group in input order.
#[derive(Debug, Default)]
struct FlightIndex {
    by_origin: HashMap<AirportCode, Vec<Arc<FlightInstance>>>,
    len: usize,
}

impl FlightIndex {
    fn build(instances: Vec<FlightInstance>) -> Self {
        let len = instances.len();
        let mut by_origin: HashMap<AirportCode, Vec<Arc<FlightInstance>>> = HashMap::new();
        for instance in instances {
            by_origin
                .entry(instance.origin())
                .or_default()
                .push(Arc::new(instance));
        }
        Self { by_origin, len }
    }

    fn departures_from(&self, airport: &AirportCode) -> &[Arc<FlightInstance>] {
        self.by_origin
            .get(airport)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// BFS state: a partial itinerary ending at `airport` at `time`.
#[derive(Debug, Clone)]
struct SearchState {
    /// Airport the trip started from.
    source: AirportCode,

    /// Current airport.
    airport: AirportCode,

    /// Arrival time at the current airport (the requested start for the seed).
    time: FlightTime,

    /// Legs flown so far.
    legs: Vec<Arc<FlightInstance>>,
}

impl SearchState {
    fn seed(source: AirportCode, start: FlightTime) -> Self {
        Self {
            source,
            airport: source,
            time: start,
            legs: Vec::new(),
        }
    }

    /// Whether `airport` is already on this partial path.
    fn has_visited(&self, airport: AirportCode) -> bool {
        airport == self.source || self.legs.iter().any(|leg| leg.destination() == airport)
    }

    /// Whether `flight` can extend this partial path.
    fn can_take(&self, flight: &FlightInstance) -> bool {
        self.time <= flight.departure_time() && !self.has_visited(flight.destination())
    }

    /// Branch: a new state after flying `flight`.
    fn extend(&self, flight: &Arc<FlightInstance>) -> Self {
        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend(self.legs.iter().cloned());
        legs.push(flight.clone());

        Self {
            source: self.source,
            airport: flight.destination(),
            time: flight.arrival_time(),
            legs,
        }
    }
}

/// Enumerates all simple, forward-in-time paths over a fixed flight set.
///
/// The flight set is indexed once; `enumerate` can then be called for
/// several source/destination pairs. Each call owns its own frontier.
pub struct PathEnumerator {
    index: FlightIndex,
    budget: SearchBudget,
}

impl PathEnumerator {
    /// Index `instances` by origin.
    pub fn new(instances: Vec<FlightInstance>) -> Self {
        Self {
            index: FlightIndex::build(instances),
            budget: SearchBudget::unlimited(),
        }
    }

    /// Limit the work done by each enumeration.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Number of indexed flights.
    pub fn flight_count(&self) -> usize {
        self.index.len
    }

    /// Find every itinerary from `source` to `destination`.
    ///
    /// A leg is usable if it doesn't revisit an airport already on the path,
    /// departs no earlier than the traveller reaches its origin, and departs
    /// at most `max_hours` after `start`. A path is complete the first time
    /// it reaches `destination`. A trip from an airport to itself has no
    /// itineraries.
    pub fn enumerate(
        &self,
        source: AirportCode,
        destination: AirportCode,
        start: FlightTime,
        max_hours: i64,
    ) -> Enumeration {
        let mut outcome = Enumeration::default();

        if source == destination {
            debug!(airport = %source, "source equals destination, nothing to search");
            return outcome;
        }

        let budget = Duration::hours(max_hours);
        let started = Instant::now();
        let mut queue: VecDeque<SearchState> = VecDeque::from([SearchState::seed(source, start)]);
        outcome.peak_frontier = queue.len();

        while let Some(state) = queue.pop_front() {
            if self.budget.exhausted(outcome.states_explored, started) {
                outcome.truncated = true;
                warn!(
                    states = outcome.states_explored,
                    found = outcome.itineraries.len(),
                    pending = queue.len() + 1,
                    "search budget exhausted, returning partial results"
                );
                break;
            }
            outcome.states_explored += 1;

            if state.airport == destination {
                match Itinerary::new(start, state.legs) {
                    Ok(itinerary) => outcome.itineraries.push(itinerary),
                    Err(e) => debug!(error = %e, "discarding invalid itinerary"),
                }
                continue;
            }

            let departures = self.index.departures_from(&state.airport);
            trace!(
                airport = %state.airport,
                departures = departures.len(),
                depth = state.legs.len(),
                "exploring airport"
            );

            for flight in departures {
                if !state.can_take(flight) {
                    continue;
                }
                if flight.departure_time().signed_duration_since(start) > budget {
                    continue;
                }
                if !self.budget.admits(outcome.states_explored + queue.len()) {
                    if !outcome.truncated {
                        warn!(
                            states = outcome.states_explored,
                            pending = queue.len(),
                            "search state limit reached, no longer branching"
                        );
                    }
                    outcome.truncated = true;
                    break;
                }
                queue.push_back(state.extend(flight));
            }
            outcome.peak_frontier = outcome.peak_frontier.max(queue.len());
        }

        debug!(
            source = %source,
            destination = %destination,
            found = outcome.itineraries.len(),
            states = outcome.states_explored,
            peak_frontier = outcome.peak_frontier,
            truncated = outcome.truncated,
            "enumeration complete"
        );

        outcome
    }
}

/// Enumerate itineraries over `instances` with no work budget.
pub fn enumerate_paths(
    instances: Vec<FlightInstance>,
    source: AirportCode,
    destination: AirportCode,
    start: FlightTime,
    max_hours: i64,
) -> Vec<Itinerary> {
    PathEnumerator::new(instances)
        .enumerate(source, destination, start, max_hours)
        .itineraries
}

/// Result of itinerary search.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: RankedItineraries,

    /// Number of flight instances generated for the window.
    pub instances_generated: usize,

    /// Number of search states explored.
    pub states_explored: usize,

    /// True if the search stopped early; `itineraries` may be incomplete.
    pub truncated: bool,
}

/// Runs one search request end to end: schedule, enumerate, rank.
///
/// The catalog is only read, so many planners can share one catalog.
pub struct Planner<'a> {
    catalog: &'a Catalog,
    durations: &'a dyn DurationPolicy,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(
        catalog: &'a Catalog,
        durations: &'a dyn DurationPolicy,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            catalog,
            durations,
            config,
        }
    }

    /// Search for itineraries matching the request.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        request.validate(self.config)?;

        let instances = ScheduleGenerator::new(self.durations)
            .with_daily_repeat(self.config.daily_repeat)
            .generate(
                self.catalog.routes().routes(),
                request.start,
                request.max_hours,
            );
        let instances_generated = instances.len();

        let enumeration = PathEnumerator::new(instances)
            .with_budget(self.config.budget())
            .enumerate(
                request.source,
                request.destination,
                request.start,
                request.max_hours,
            );

        let itineraries = RankedItineraries::rank(enumeration.itineraries);

        debug!(
            source = %request.source,
            destination = %request.destination,
            start = %request.start,
            max_hours = request.max_hours,
            instances = instances_generated,
            found = itineraries.len(),
            "search complete"
        );

        Ok(SearchResult {
            itineraries,
            instances_generated,
            states_explored: enumeration.states_explored,
            truncated: enumeration.truncated,
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
