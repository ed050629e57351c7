//! Domain types for the flight itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod airport;
mod carrier;
mod error;
mod flight;
mod itinerary;
mod time;

pub use airport::{Airport, AirportCode, InvalidAirportCode};
pub use carrier::{CarrierCode, InvalidCarrierCode};
pub use error::DomainError;
pub use flight::{FlightInstance, Route};
pub use itinerary::Itinerary;
pub use time::{FlightTime, TimeError};
