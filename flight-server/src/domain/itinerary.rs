//! Itinerary type.
//!
//! An `Itinerary` is a complete trip from origin to destination made of one
//! or more flight legs. Legs are shared `Arc<FlightInstance>` values so that
//! branching during search only copies pointers.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;

use super::{AirportCode, DomainError, FlightInstance, FlightTime};

/// A complete itinerary for one search request.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (destination of one = origin of next)
/// - No airport appears twice in the stop sequence
/// - Each leg departs no earlier than the previous leg arrives
/// - The first leg departs no earlier than the requested start
#[derive(Debug, Clone)]
pub struct Itinerary {
    requested_start: FlightTime,
    stops: Vec<AirportCode>,
    legs: Vec<Arc<FlightInstance>>,
}

impl Itinerary {
    /// Construct an itinerary, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the legs are empty, don't connect, revisit an airport,
    /// go backwards in time, or start before `requested_start`.
    pub fn new(
        requested_start: FlightTime,
        legs: Vec<Arc<FlightInstance>>,
    ) -> Result<Self, DomainError> {
        let first = legs.first().ok_or(DomainError::EmptyItinerary)?;

        if first.departure_time() < requested_start {
            return Err(DomainError::DepartsBeforeStart);
        }

        for window in legs.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if prev.destination() != next.origin() {
                return Err(DomainError::LegsNotConnected(
                    prev.destination(),
                    next.origin(),
                ));
            }
            if next.departure_time() < prev.arrival_time() {
                return Err(DomainError::BackwardConnection(next.origin()));
            }
        }

        let mut stops = Vec::with_capacity(legs.len() + 1);
        stops.push(first.origin());
        stops.extend(legs.iter().map(|leg| leg.destination()));

        let mut seen = HashSet::with_capacity(stops.len());
        for stop in &stops {
            if !seen.insert(*stop) {
                return Err(DomainError::RepeatedAirport(*stop));
            }
        }

        Ok(Self {
            requested_start,
            stops,
            legs,
        })
    }

    /// The start time the search was requested for.
    pub fn requested_start(&self) -> FlightTime {
        self.requested_start
    }

    /// Airports visited in order, origin first and destination last.
    pub fn stops(&self) -> &[AirportCode] {
        &self.stops
    }

    pub fn legs(&self) -> &[Arc<FlightInstance>] {
        &self.legs
    }

    pub fn origin(&self) -> AirportCode {
        self.stops[0]
    }

    pub fn destination(&self) -> AirportCode {
        // At least two stops by construction
        self.stops[self.stops.len() - 1]
    }

    /// Departure of the first leg.
    pub fn departure_time(&self) -> FlightTime {
        self.legs[0].departure_time()
    }

    /// Arrival of the last leg.
    pub fn arrival_time(&self) -> FlightTime {
        self.legs[self.legs.len() - 1].arrival_time()
    }

    /// Destination arrival minus the requested start time.
    pub fn total_elapsed(&self) -> Duration {
        self.arrival_time().signed_duration_since(self.requested_start)
    }

    /// Sum of in-air durations, excluding waiting on the ground.
    pub fn flight_time(&self) -> Duration {
        self.legs
            .iter()
            .map(|leg| leg.flight_duration())
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    /// Time spent on the ground, before the first leg and between legs.
    pub fn ground_time(&self) -> Duration {
        self.total_elapsed() - self.flight_time()
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Number of connections (legs - 1).
    pub fn change_count(&self) -> usize {
        self.legs.len() - 1
    }

    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }
}
