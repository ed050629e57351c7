//! Parsers for the OpenFlights `airports.dat` and `routes.dat` files.
//!
//! Both files are headerless comma-separated text with quoted fields. Lines
//! the CSV reader can't make sense of are skipped; deciding which of the
//! remaining records are usable is left to the catalog.

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::catalog::{AirportRecord, RouteRecord};

/// Field positions in `airports.dat`.
mod airport_field {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const CITY: usize = 2;
    pub const COUNTRY: usize = 3;
    pub const IATA: usize = 4;
    pub const ICAO: usize = 5;
}

/// Field positions in `routes.dat`.
mod route_field {
    pub const AIRLINE: usize = 0;
    pub const SOURCE: usize = 2;
    pub const DESTINATION: usize = 4;
}

/// Parse the contents of `airports.dat`.
pub fn parse_airports(data: &[u8]) -> Vec<AirportRecord> {
    let records = read_records(data, "airports");
    records
        .iter()
        .map(|record| AirportRecord {
            id: field(record, airport_field::ID),
            name: field(record, airport_field::NAME),
            city: field(record, airport_field::CITY),
            country: field(record, airport_field::COUNTRY),
            iata: field(record, airport_field::IATA),
            icao: field(record, airport_field::ICAO),
        })
        .collect()
}

/// Parse the contents of `routes.dat`.
pub fn parse_routes(data: &[u8]) -> Vec<RouteRecord> {
    let records = read_records(data, "routes");
    records
        .iter()
        .map(|record| RouteRecord {
            origin: field(record, route_field::SOURCE),
            destination: field(record, route_field::DESTINATION),
            carrier: field(record, route_field::AIRLINE),
        })
        .collect()
}

fn read_records(data: &[u8], kind: &'static str) -> Vec<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    let mut unreadable = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                unreadable += 1;
                debug!(kind, error = %e, "skipping unreadable line");
            }
        }
    }

    debug!(kind, records = records.len(), unreadable, "parsed OpenFlights data");
    records
}

fn field(record: &StringRecord, idx: usize) -> Option<String> {
    record.get(idx).map(str::to_string)
}
