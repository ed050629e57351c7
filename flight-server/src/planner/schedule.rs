//! Timetable generation.
//!
//! The route catalog has no timings, so each search projects it onto its
//! requested window: the route at load position `i` departs `i mod 24` hours
//! after the window opens, and (with daily repetition) again every 24 hours
//! after that while still inside the window. How long each flight takes is
//! left to a [`DurationPolicy`].

use chrono::Duration;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::domain::{FlightInstance, FlightTime, Route};

/// Hours in the repeating timetable cycle.
const CYCLE_HOURS: i64 = 24;

/// Supplies the flight duration for the route at a given load position.
pub trait DurationPolicy: Send + Sync {
    fn flight_duration(&self, edge_index: usize) -> Duration;
}

/// Uniform whole-minute durations in `[min, max)`, reproducible per seed.
///
/// Each route index gets its own generator seeded from `(seed, index)`, so
/// the duration for a route doesn't depend on which other routes were asked
/// for first.
#[derive(Debug, Clone, Copy)]
pub struct SeededDurations {
    seed: u64,
    min_mins: i64,
    max_mins: i64,
}

impl SeededDurations {
    pub fn new(seed: u64, min: Duration, max: Duration) -> Self {
        Self {
            seed,
            min_mins: min.num_minutes(),
            max_mins: max.num_minutes(),
        }
    }
}

impl DurationPolicy for SeededDurations {
    fn flight_duration(&self, edge_index: usize) -> Duration {
        // Spread consecutive indices across the seed space
        let mixed = self.seed ^ (edge_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = SmallRng::seed_from_u64(mixed);
        Duration::minutes(draw_minutes(&mut rng, self.min_mins, self.max_mins))
    }
}

/// Uniform whole-minute durations in `[min, max)` from the thread RNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomDurations {
    min_mins: i64,
    max_mins: i64,
}

impl RandomDurations {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min_mins: min.num_minutes(),
            max_mins: max.num_minutes(),
        }
    }
}

impl DurationPolicy for RandomDurations {
    fn flight_duration(&self, _edge_index: usize) -> Duration {
        Duration::minutes(draw_minutes(&mut rand::rng(), self.min_mins, self.max_mins))
    }
}

/// The same duration for every flight.
#[derive(Debug, Clone, Copy)]
pub struct FixedDuration(pub Duration);

impl DurationPolicy for FixedDuration {
    fn flight_duration(&self, _edge_index: usize) -> Duration {
        self.0
    }
}

/// Draw from `[min, max)`, or `min` if the range is empty.
fn draw_minutes<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Projects routes onto a departure window.
pub struct ScheduleGenerator<'a> {
    policy: &'a dyn DurationPolicy,
    daily_repeat: bool,
}

impl<'a> ScheduleGenerator<'a> {
    /// Create a generator producing one departure per route (no repetition).
    pub fn new(policy: &'a dyn DurationPolicy) -> Self {
        Self {
            policy,
            daily_repeat: false,
        }
    }

    /// Also schedule each route again every 24 hours inside the window.
    pub fn with_daily_repeat(mut self, daily_repeat: bool) -> Self {
        self.daily_repeat = daily_repeat;
        self
    }

    /// Generate flight instances departing within `window_hours` of `window_start`.
    ///
    /// Routes are numbered by their position in `routes`. A route whose
    /// departure falls outside the window contributes nothing, and a policy
    /// returning a non-positive duration yields no instance for that route.
    pub fn generate(
        &self,
        routes: &[Route],
        window_start: FlightTime,
        window_hours: i64,
    ) -> Vec<FlightInstance> {
        let window = Duration::hours(window_hours);
        let mut instances = Vec::new();

        for (idx, route) in routes.iter().enumerate() {
            let base_offset = Duration::hours(idx as i64 % CYCLE_HOURS);
            if base_offset > window {
                continue;
            }

            let duration = self.policy.flight_duration(idx);
            if duration <= Duration::zero() {
                trace!(
                    idx,
                    origin = %route.origin,
                    destination = %route.destination,
                    "duration policy returned non-positive duration, skipping route"
                );
                continue;
            }

            let mut offset = base_offset;
            while offset <= window {
                let departure = match window_start.checked_add(offset) {
                    Some(t) => t,
                    None => break,
                };
                let arrival = match departure.checked_add(duration) {
                    Some(t) => t,
                    None => break,
                };

                if let Ok(instance) = FlightInstance::new(*route, departure, arrival) {
                    instances.push(instance);
                }

                if !self.daily_repeat {
                    break;
                }
                offset += Duration::hours(CYCLE_HOURS);
            }
        }

        debug!(
            routes = routes.len(),
            instances = instances.len(),
            window_hours,
            "generated flight schedule"
        );

        instances
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{AirportCode, CarrierCode};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn start() -> FlightTime {
        FlightTime::parse_hhmm("06:30", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap()
    }

    proptest! {
        /// Every instance flies forward in time and departs inside the window
        #[test]
        fn instances_are_positive_and_in_window(
            seed in any::<u64>(),
            route_count in 0usize..60,
            window_hours in 0i64..96,
            daily_repeat in any::<bool>(),
        ) {
            let route = Route::new(
                AirportCode::parse("JFK").unwrap(),
                AirportCode::parse("LHR").unwrap(),
                CarrierCode::parse("BA").unwrap(),
            );
            let routes = vec![route; route_count];
            let policy = SeededDurations::new(seed, Duration::hours(2), Duration::hours(10));
            let generator = ScheduleGenerator::new(&policy).with_daily_repeat(daily_repeat);

            for instance in generator.generate(&routes, start(), window_hours) {
                let offset = instance.departure_time().signed_duration_since(start());
                prop_assert!(instance.arrival_time() > instance.departure_time());
                prop_assert!(instance.departure_time() >= start());
                prop_assert!(offset <= Duration::hours(window_hours));
                prop_assert!(instance.flight_duration() >= Duration::hours(2));
                prop_assert!(instance.flight_duration() < Duration::hours(10));
            }
        }

        /// Seeded durations always fall inside the configured bounds
        #[test]
        fn seeded_within_bounds(seed in any::<u64>(), idx in 0usize..100_000) {
            let policy = SeededDurations::new(seed, Duration::hours(2), Duration::hours(10));
            let d = policy.flight_duration(idx);
            prop_assert!(d >= Duration::hours(2) && d < Duration::hours(10));
        }
    }
}
