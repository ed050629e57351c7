//! Airport code and display types.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid airport code: 3 (IATA) or 4 (ICAO) uppercase ASCII letters or digits.
///
/// Route feeds identify airports by IATA code where one exists and fall back
/// to ICAO otherwise, so both lengths are accepted. Any `AirportCode` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use flight_server::domain::AirportCode;
///
/// let jfk = AirportCode::parse("JFK").unwrap();
/// assert_eq!(jfk.as_str(), "JFK");
///
/// // ICAO codes are accepted too
/// assert!(AirportCode::parse("KJFK").is_ok());
///
/// // Lowercase is rejected
/// assert!(AirportCode::parse("jfk").is_err());
///
/// // Wrong length is rejected
/// assert!(AirportCode::parse("JF").is_err());
/// assert!(AirportCode::parse("KJFKX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode {
    bytes: [u8; 4],
    len: u8,
}

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be 3 or 4 characters, each an uppercase ASCII letter or digit.
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 && bytes.len() != 4 {
            return Err(InvalidAirportCode {
                reason: "must be 3 or 4 characters",
            });
        }

        let mut code = [0u8; 4];
        for (slot, &b) in code.iter_mut().zip(bytes) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidAirportCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            *slot = b;
        }

        Ok(AirportCode {
            bytes: code,
            len: bytes.len() as u8,
        })
    }

    /// Parse user input: surrounding whitespace is trimmed and letters upper-cased.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII letters and digits
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An airport with its display attributes.
///
/// Only `code` takes part in search; the rest is passed through to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airport {
    /// Code used by route records to refer to this airport.
    pub code: AirportCode,
    /// Identifier in the source feed.
    pub source_id: u32,
    pub name: String,
    pub city: String,
    pub country: String,
    /// ICAO code, when the feed has one alongside the IATA code.
    pub icao: Option<AirportCode>,
}

impl Airport {
    /// Human-readable label, e.g. "John F Kennedy International Airport, New York".
    pub fn label(&self) -> String {
        if self.city.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.city)
        }
    }
}
