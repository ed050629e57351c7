//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::AirportDirectory;
use crate::domain::{Airport, AirportCode, FlightInstance, FlightTime, Itinerary};
use crate::planner::View;

/// Request to search airports.
#[derive(Debug, Deserialize)]
pub struct AirportSearchRequest {
    /// Code prefix or name/city fragment
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// An airport in API responses.
#[derive(Debug, Serialize)]
pub struct AirportResult {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
}

/// Response for airport search.
#[derive(Debug, Serialize)]
pub struct AirportSearchResponse {
    /// Matching airports, best match first
    pub airports: Vec<AirportResult>,
}

/// Which slice of the ranked results to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Only the fastest itinerary
    Optimal,
    /// The fastest `k`
    #[default]
    Top,
    /// The slowest `k`, slowest first
    Worst,
}

impl ViewKind {
    /// Resolve into a planner view returning `k` itineraries.
    pub fn with_count(self, k: usize) -> View {
        match self {
            ViewKind::Optimal => View::Optimal,
            ViewKind::Top => View::Top(k),
            ViewKind::Worst => View::Worst(k),
        }
    }
}

/// Request to plan itineraries.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    /// Source airport code
    pub source: String,

    /// Destination airport code
    pub destination: String,

    /// Earliest departure in HH:MM format (today)
    pub start: String,

    /// Duration budget in hours
    pub duration_hours: i64,

    /// Which results to return (defaults to top)
    #[serde(default)]
    pub view: ViewKind,

    /// Number of results for top/worst views
    pub k: Option<usize>,
}

/// A timestamp relative to the requested start date.
#[derive(Debug, Serialize)]
pub struct TimeResult {
    /// Wall-clock time, "HH:MM"
    pub time: String,

    /// Days after the requested start date (0 = same day)
    pub day_offset: i64,
}

/// A flight within an itinerary.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Carrier code ("??" when the feed didn't name one)
    pub carrier: String,

    pub origin: StopResult,
    pub destination: StopResult,

    pub departure: TimeResult,
    pub arrival: TimeResult,

    /// Time in the air in minutes
    pub duration_mins: i64,
}

/// An airport on an itinerary.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub code: String,

    /// Display name, when the airport is in the directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One itinerary option.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Airports visited, source first
    pub stops: Vec<StopResult>,

    pub legs: Vec<LegResult>,

    pub departure: TimeResult,
    pub arrival: TimeResult,

    /// Arrival minus requested start, in hours
    pub total_hours: f64,

    /// Time in the air, in hours
    pub flight_hours: f64,

    /// Number of changes
    pub changes: usize,
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    /// Selected itineraries in view order
    pub itineraries: Vec<ItineraryResult>,

    /// Number of itineraries found before selection
    pub total_found: usize,

    /// True if the search stopped early and results may be incomplete
    pub truncated: bool,

    /// Explanation when nothing was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl AirportResult {
    /// Create from a domain Airport.
    pub fn from_airport(airport: &Airport) -> Self {
        Self {
            code: airport.code.as_str().to_string(),
            name: airport.name.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
            icao: airport.icao.map(|c| c.as_str().to_string()),
        }
    }
}

impl StopResult {
    fn from_code(code: AirportCode, airports: &AirportDirectory) -> Self {
        Self {
            code: code.as_str().to_string(),
            name: airports.get(&code).map(|a| a.name.clone()),
        }
    }
}

impl TimeResult {
    fn relative_to(time: FlightTime, start: FlightTime) -> Self {
        Self {
            time: time.to_string(),
            day_offset: time.days_after(start),
        }
    }
}

impl LegResult {
    /// Create from a scheduled flight.
    pub fn from_flight(
        flight: &FlightInstance,
        start: FlightTime,
        airports: &AirportDirectory,
    ) -> Self {
        Self {
            carrier: flight.carrier().as_str().to_string(),
            origin: StopResult::from_code(flight.origin(), airports),
            destination: StopResult::from_code(flight.destination(), airports),
            departure: TimeResult::relative_to(flight.departure_time(), start),
            arrival: TimeResult::relative_to(flight.arrival_time(), start),
            duration_mins: flight.flight_duration().num_minutes(),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary, airports: &AirportDirectory) -> Self {
        let start = itinerary.requested_start();

        Self {
            stops: itinerary
                .stops()
                .iter()
                .map(|code| StopResult::from_code(*code, airports))
                .collect(),
            legs: itinerary
                .legs()
                .iter()
                .map(|leg| LegResult::from_flight(leg, start, airports))
                .collect(),
            departure: TimeResult::relative_to(itinerary.departure_time(), start),
            arrival: TimeResult::relative_to(itinerary.arrival_time(), start),
            total_hours: hours(itinerary.total_elapsed()),
            flight_hours: hours(itinerary.flight_time()),
            changes: itinerary.change_count(),
        }
    }
}

/// Minutes as fractional hours, rounded to two decimal places.
fn hours(duration: chrono::Duration) -> f64 {
    (duration.num_minutes() as f64 / 60.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AirportRecord;
    use crate::domain::{CarrierCode, Route};
    use chrono::{Duration, NaiveDate};
    use std::sync::Arc;

    fn start() -> FlightTime {
        FlightTime::parse_hhmm("22:00", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap()
    }

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn directory() -> AirportDirectory {
        AirportDirectory::build(vec![AirportRecord {
            id: Some("3797".into()),
            name: Some("John F Kennedy International Airport".into()),
            city: Some("New York".into()),
            country: Some("United States".into()),
            iata: Some("JFK".into()),
            icao: Some("KJFK".into()),
        }])
    }

    fn flight(from: &str, to: &str, dep_mins: i64, arr_mins: i64) -> Arc<FlightInstance> {
        let route = Route::new(code(from), code(to), CarrierCode::parse("BA").unwrap());
        Arc::new(
            FlightInstance::new(
                route,
                start() + Duration::minutes(dep_mins),
                start() + Duration::minutes(arr_mins),
            )
            .unwrap(),
        )
    }

    #[test]
    fn itinerary_result_fields() {
        let itinerary = Itinerary::new(
            start(),
            vec![flight("JFK", "LHR", 60, 480), flight("LHR", "CDG", 540, 615)],
        )
        .unwrap();

        let result = ItineraryResult::from_itinerary(&itinerary, &directory());

        let codes: Vec<_> = result.stops.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["JFK", "LHR", "CDG"]);
        assert_eq!(
            result.stops[0].name.as_deref(),
            Some("John F Kennedy International Airport")
        );
        assert_eq!(result.stops[1].name, None);

        assert_eq!(result.changes, 1);
        assert_eq!(result.total_hours, 10.25);
        assert_eq!(result.flight_hours, 8.25);

        assert_eq!(result.departure.time, "23:00");
        assert_eq!(result.departure.day_offset, 0);
        assert_eq!(result.arrival.time, "08:15");
        assert_eq!(result.arrival.day_offset, 1);

        let leg = &result.legs[1];
        assert_eq!(leg.carrier, "BA");
        assert_eq!(leg.duration_mins, 75);
        assert_eq!(leg.departure.time, "07:00");
        assert_eq!(leg.departure.day_offset, 1);
    }

    #[test]
    fn view_kind_parsing() {
        let req: ItineraryRequest = serde_json::from_str(
            r#"{"source":"JFK","destination":"HND","start":"09:00","duration_hours":48}"#,
        )
        .unwrap();
        assert_eq!(req.view, ViewKind::Top);
        assert_eq!(req.k, None);

        let req: ItineraryRequest = serde_json::from_str(
            r#"{"source":"JFK","destination":"HND","start":"09:00","duration_hours":48,"view":"worst","k":3}"#,
        )
        .unwrap();
        assert_eq!(req.view, ViewKind::Worst);
        assert_eq!(req.view.with_count(3), View::Worst(3));
        assert_eq!(ViewKind::Optimal.with_count(3), View::Optimal);
    }

    #[test]
    fn empty_message_is_omitted() {
        let response = ItineraryResponse {
            itineraries: Vec::new(),
            total_found: 0,
            truncated: false,
            message: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("message").is_none());
    }
}
