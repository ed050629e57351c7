//! Domain error types.
//!
//! These errors represent invariant violations when constructing flights and
//! itineraries. They are distinct from data-load and request errors.

use super::{AirportCode, FlightTime};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A flight must arrive strictly after it departs
    #[error("flight {origin}->{destination} arrives at {arrival} but departs at {departure}")]
    NonPositiveFlight {
        origin: AirportCode,
        destination: AirportCode,
        departure: FlightTime,
        arrival: FlightTime,
    },

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Consecutive legs don't share an airport
    #[error("legs do not connect: arrives at {0} but next leg departs from {1}")]
    LegsNotConnected(AirportCode, AirportCode),

    /// An airport appears twice in the stop sequence
    #[error("airport {0} is visited more than once")]
    RepeatedAirport(AirportCode),

    /// A leg departs before the previous one arrives
    #[error("connection at {0} departs before the inbound flight arrives")]
    BackwardConnection(AirportCode),

    /// First leg departs before the requested start
    #[error("first leg departs before the requested start time")]
    DepartsBeforeStart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let jfk = AirportCode::parse("JFK").unwrap();
        let lhr = AirportCode::parse("LHR").unwrap();

        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one leg");

        let err = DomainError::LegsNotConnected(jfk, lhr);
        assert_eq!(
            err.to_string(),
            "legs do not connect: arrives at JFK but next leg departs from LHR"
        );

        let err = DomainError::RepeatedAirport(lhr);
        assert_eq!(err.to_string(), "airport LHR is visited more than once");

        let err = DomainError::BackwardConnection(lhr);
        assert_eq!(
            err.to_string(),
            "connection at LHR departs before the inbound flight arrives"
        );
    }
}
