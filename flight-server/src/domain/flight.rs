//! Routes and their scheduled occurrences.

use chrono::Duration;

use super::{AirportCode, CarrierCode, DomainError, FlightTime};

/// A static directed connection between two airports, without timing.
///
/// Parallel routes (same airports, different carriers) are distinct values.
/// Self-loops are representable but can never appear in an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub carrier: CarrierCode,
}

impl Route {
    pub fn new(origin: AirportCode, destination: AirportCode, carrier: CarrierCode) -> Self {
        Self {
            origin,
            destination,
            carrier,
        }
    }

    /// Returns true if the route starts and ends at the same airport.
    pub fn is_self_loop(&self) -> bool {
        self.origin == self.destination
    }
}

/// A timed occurrence of a [`Route`], valid for one search.
///
/// # Invariants
///
/// - `arrival > departure`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightInstance {
    route: Route,
    departure: FlightTime,
    arrival: FlightTime,
}

impl FlightInstance {
    /// Construct a flight instance, rejecting non-positive flight durations.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_server::domain::{AirportCode, CarrierCode, FlightInstance, FlightTime, Route};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let route = Route::new(
    ///     AirportCode::parse("JFK").unwrap(),
    ///     AirportCode::parse("LHR").unwrap(),
    ///     CarrierCode::parse("BA").unwrap(),
    /// );
    /// let dep = FlightTime::parse_hhmm("18:00", date).unwrap();
    /// let arr = FlightTime::parse_hhmm("23:30", date).unwrap();
    ///
    /// let flight = FlightInstance::new(route, dep, arr).unwrap();
    /// assert_eq!(flight.flight_duration().num_minutes(), 330);
    ///
    /// assert!(FlightInstance::new(route, arr, dep).is_err());
    /// ```
    pub fn new(
        route: Route,
        departure: FlightTime,
        arrival: FlightTime,
    ) -> Result<Self, DomainError> {
        if arrival <= departure {
            return Err(DomainError::NonPositiveFlight {
                origin: route.origin,
                destination: route.destination,
                departure,
                arrival,
            });
        }

        Ok(Self {
            route,
            departure,
            arrival,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn origin(&self) -> AirportCode {
        self.route.origin
    }

    pub fn destination(&self) -> AirportCode {
        self.route.destination
    }

    pub fn carrier(&self) -> CarrierCode {
        self.route.carrier
    }

    pub fn departure_time(&self) -> FlightTime {
        self.departure
    }

    pub fn arrival_time(&self) -> FlightTime {
        self.arrival
    }

    /// Time in the air. Always strictly positive.
    pub fn flight_duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(s: &str) -> FlightTime {
        FlightTime::parse_hhmm(s, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap()
    }

    fn route(from: &str, to: &str) -> Route {
        Route::new(
            AirportCode::parse(from).unwrap(),
            AirportCode::parse(to).unwrap(),
            CarrierCode::parse("AA").unwrap(),
        )
    }

    #[test]
    fn valid_instance() {
        let flight = FlightInstance::new(route("JFK", "LAX"), time("08:00"), time("11:15")).unwrap();

        assert_eq!(flight.origin().as_str(), "JFK");
        assert_eq!(flight.destination().as_str(), "LAX");
        assert_eq!(flight.carrier().as_str(), "AA");
        assert_eq!(flight.departure_time(), time("08:00"));
        assert_eq!(flight.arrival_time(), time("11:15"));
        assert_eq!(flight.flight_duration(), Duration::minutes(195));
    }

    #[test]
    fn zero_duration_rejected() {
        let err = FlightInstance::new(route("JFK", "LAX"), time("08:00"), time("08:00")).unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveFlight { .. }));
    }

    #[test]
    fn negative_duration_rejected() {
        assert!(FlightInstance::new(route("JFK", "LAX"), time("09:00"), time("08:00")).is_err());
    }

    #[test]
    fn self_loop_detection() {
        assert!(route("JFK", "JFK").is_self_loop());
        assert!(!route("JFK", "LAX").is_self_loop());
    }
}
