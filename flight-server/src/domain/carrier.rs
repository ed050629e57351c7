//! Carrier (airline) code type.

use std::fmt;

/// Error returned when parsing an invalid carrier code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid carrier code: {reason}")]
pub struct InvalidCarrierCode {
    reason: &'static str,
}

/// A carrier code: 2 (IATA, e.g. "BA", "U2") or 3 (ICAO, e.g. "BAW")
/// uppercase ASCII letters or digits.
///
/// # Examples
///
/// ```
/// use flight_server::domain::CarrierCode;
///
/// let ba = CarrierCode::parse("BA").unwrap();
/// assert_eq!(ba.as_str(), "BA");
///
/// assert!(CarrierCode::parse("U2").is_ok());
/// assert!(CarrierCode::parse("ba").is_err());
/// assert!(CarrierCode::parse("B").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierCode {
    bytes: [u8; 3],
    len: u8,
}

impl CarrierCode {
    /// Placeholder for routes whose feed record has no usable carrier.
    pub const UNKNOWN: CarrierCode = CarrierCode {
        bytes: *b"??\0",
        len: 2,
    };

    /// Parse a carrier code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidCarrierCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 && bytes.len() != 3 {
            return Err(InvalidCarrierCode {
                reason: "must be 2 or 3 characters",
            });
        }

        let mut code = [0u8; 3];
        for (slot, &b) in code.iter_mut().zip(bytes) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidCarrierCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            *slot = b;
        }

        Ok(CarrierCode {
            bytes: code,
            len: bytes.len() as u8,
        })
    }

    /// Returns the carrier code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII characters
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }

    /// Returns true for the placeholder used when the feed had no carrier.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Debug for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarrierCode({})", self.as_str())
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
