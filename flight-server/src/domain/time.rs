//! Timestamps for scheduled flights.
//!
//! Searches are requested as a wall-clock "HH:MM" start, but a search window
//! can span several days, so every timestamp carries a date as well. There are
//! no time zones: all times are on one notional clock.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::ops::Add;

/// A wall-clock start time that isn't a valid "HH:MM".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// Not two digits, a colon, and two digits
    #[error("expected a time like 09:30, got {0:?}")]
    Format(String),

    /// Well-formed but not a time of day
    #[error("{0:?} is not a time of day")]
    OutOfRange(String),
}

/// A date-aware timestamp.
///
/// # Examples
///
/// ```
/// use flight_server::domain::FlightTime;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let boarding = FlightTime::parse_hhmm("14:30", day).unwrap();
/// assert_eq!(boarding.to_string(), "14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightTime(NaiveDateTime);

impl FlightTime {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }

    /// Parse a strict "HH:MM" (24-hour, zero-padded) on `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_server::domain::FlightTime;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(FlightTime::parse_hhmm("00:00", day).is_ok());
    /// assert!(FlightTime::parse_hhmm("23:59", day).is_ok());
    ///
    /// assert!(FlightTime::parse_hhmm("1430", day).is_err());
    /// assert!(FlightTime::parse_hhmm("9:30", day).is_err());
    /// assert!(FlightTime::parse_hhmm("24:00", day).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let well_formed = s.len() == 5
            && s.bytes()
                .enumerate()
                .all(|(i, b)| if i == 2 { b == b':' } else { b.is_ascii_digit() });
        if !well_formed {
            return Err(TimeError::Format(s.to_string()));
        }

        NaiveTime::parse_from_str(s, "%H:%M")
            .map(|time| Self::new(date, time))
            .map_err(|_| TimeError::OutOfRange(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Add a duration, returning `None` on overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_server::domain::FlightTime;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let late = FlightTime::parse_hhmm("23:30", day).unwrap();
    ///
    /// let landing = late.checked_add(Duration::hours(1)).unwrap();
    /// assert_eq!(landing.to_string(), "00:30");
    /// assert_eq!(landing.days_after(late), 1);
    /// ```
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        self.0.checked_sub_signed(duration).map(Self)
    }

    /// `self - earlier`; negative if `earlier` is actually later.
    pub fn signed_duration_since(&self, earlier: Self) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// Whole calendar days between `origin`'s date and this timestamp's date.
    ///
    /// Used for "+1" style display of times after midnight.
    pub fn days_after(&self, origin: Self) -> i64 {
        (self.date() - origin.date()).num_days()
    }
}

impl Add<Duration> for FlightTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).expect("flight time out of range")
    }
}

impl fmt::Debug for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightTime({})", self.0.format("%Y-%m-%d %H:%M"))
    }
}

impl fmt::Display for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn at(s: &str) -> FlightTime {
        FlightTime::parse_hhmm(s, day(15)).unwrap()
    }

    #[test]
    fn parses_wall_clock_times() {
        assert_eq!((at("00:00").hour(), at("00:00").minute()), (0, 0));
        assert_eq!((at("23:59").hour(), at("23:59").minute()), (23, 59));
        assert_eq!((at("07:05").hour(), at("07:05").minute()), (7, 5));
        assert_eq!(at("07:05").date(), day(15));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "1430", "14:3", "14-30", "ab:cd", " 9:30", "14:30 ", "+1:30"] {
            assert_eq!(
                FlightTime::parse_hhmm(bad, day(15)),
                Err(TimeError::Format(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn rejects_impossible_times() {
        for bad in ["24:00", "12:60", "99:99"] {
            assert_eq!(
                FlightTime::parse_hhmm(bad, day(15)),
                Err(TimeError::OutOfRange(bad.to_string()))
            );
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            TimeError::Format("9am".into()).to_string(),
            "expected a time like 09:30, got \"9am\""
        );
        assert_eq!(
            TimeError::OutOfRange("25:00".into()).to_string(),
            "\"25:00\" is not a time of day"
        );
    }

    #[test]
    fn overnight_arithmetic() {
        let departure = at("22:00");
        let landing = departure + Duration::hours(30);

        assert_eq!(landing.to_string(), "04:00");
        assert_eq!(landing.date(), day(17));
        assert_eq!(landing.days_after(departure), 2);
        assert_eq!(departure.days_after(landing), -2);
    }

    #[test]
    fn elapsed_between_times() {
        assert_eq!(at("12:30").signed_duration_since(at("10:00")), Duration::minutes(150));
        assert_eq!(at("10:00").signed_duration_since(at("12:30")), Duration::minutes(-150));
    }

    #[test]
    fn later_date_sorts_later() {
        let late = at("23:00");
        let next_morning = FlightTime::parse_hhmm("01:00", day(16)).unwrap();
        assert!(late < next_morning);
        assert_eq!(next_morning.signed_duration_since(late), Duration::hours(2));
    }

    #[test]
    fn debug_shows_date_and_time() {
        assert_eq!(format!("{:?}", at("09:15")), "FlightTime(2024-03-15 09:15)");
        assert_eq!(at("09:15").to_datetime().date(), day(15));
    }
}
