//! Airport code → display attributes lookup.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Airport, AirportCode};

/// An airport record as handed over by a data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirportRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
}

/// Read-only lookup of airports by code.
///
/// Airports are keyed by IATA code, or by ICAO code when the feed has no
/// IATA code for them (route feeds fall back to ICAO in the same way).
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    by_code: BTreeMap<AirportCode, Airport>,
}

impl AirportDirectory {
    /// Build the directory, dropping records without a usable code or name.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AirportRecord>,
    {
        let mut by_code = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            match to_airport(record) {
                Some(airport) => {
                    by_code.insert(airport.code, airport);
                }
                None => skipped += 1,
            }
        }

        debug!(airports = by_code.len(), skipped, "built airport directory");

        Self { by_code }
    }

    /// Look up an airport by code.
    pub fn get(&self, code: &AirportCode) -> Option<&Airport> {
        self.by_code.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// All airports, ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &Airport> + '_ {
        self.by_code.values()
    }

    /// Case-insensitive search by code, name or city.
    ///
    /// Exact code matches come first, then code prefixes, then name or city
    /// substrings. Within each group results are ordered by code.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Airport> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let upper = query.to_uppercase();
        let lower = query.to_lowercase();

        let mut matches: Vec<(u8, &Airport)> = self
            .by_code
            .values()
            .filter_map(|airport| {
                let code = airport.code.as_str();
                let rank = if code == upper {
                    0
                } else if code.starts_with(&upper) {
                    1
                } else if airport.name.to_lowercase().contains(&lower)
                    || airport.city.to_lowercase().contains(&lower)
                {
                    2
                } else {
                    return None;
                };
                Some((rank, airport))
            })
            .collect();

        // Stable: ties keep code order from the BTreeMap
        matches.sort_by_key(|(rank, _)| *rank);
        matches.truncate(limit);
        matches.into_iter().map(|(_, airport)| airport).collect()
    }
}

fn text(field: Option<String>) -> String {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| s != "\\N")
        .unwrap_or_default()
}

fn code(field: Option<&str>) -> Option<AirportCode> {
    field.and_then(|s| AirportCode::parse(s.trim()).ok())
}

fn to_airport(record: AirportRecord) -> Option<Airport> {
    let iata = code(record.iata.as_deref());
    let icao = code(record.icao.as_deref());
    let key = iata.or(icao)?;

    let name = text(record.name);
    if name.is_empty() {
        return None;
    }

    Some(Airport {
        code: key,
        source_id: record
            .id
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0),
        name,
        city: text(record.city),
        country: text(record.country),
        icao: icao.filter(|c| *c != key),
    })
}
