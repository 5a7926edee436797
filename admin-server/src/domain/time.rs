//! Arrival time handling for trip transits.
//!
//! The trip service stores transit arrival times as "HH:MM" strings with no
//! date component: a transit's arrival is a wall-clock time of day that
//! applies to whichever date the trip runs on.

use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid arrival time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid arrival time: {reason}")]
pub struct InvalidArrivalTime {
    reason: &'static str,
}

impl InvalidArrivalTime {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day in "HH:MM" (24-hour) format.
///
/// # Examples
///
/// ```
/// use admin_server::domain::ArrivalTime;
///
/// let t = ArrivalTime::parse("14:30").unwrap();
/// assert_eq!(t.to_string(), "14:30");
///
/// // Invalid formats are rejected
/// assert!(ArrivalTime::parse("1430").is_err());
/// assert!(ArrivalTime::parse("25:00").is_err());
/// assert!(ArrivalTime::parse("14:3").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrivalTime {
    hour: u8,
    minute: u8,
}

impl ArrivalTime {
    /// Parse an arrival time from "HH:MM" format.
    pub fn parse(s: &str) -> Result<Self, InvalidArrivalTime> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(InvalidArrivalTime::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(InvalidArrivalTime::new("expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| InvalidArrivalTime::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(InvalidArrivalTime::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| InvalidArrivalTime::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(InvalidArrivalTime::new("minute must be 0-59"));
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight, for ordering and duration arithmetic.
    pub fn minutes_from_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl Ord for ArrivalTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes_from_midnight()
            .cmp(&other.minutes_from_midnight())
    }
}

impl PartialOrd for ArrivalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrivalTime({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = ArrivalTime::parse("00:00").unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);

        let t = ArrivalTime::parse("23:59").unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = ArrivalTime::parse("14:30").unwrap();
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong length
        assert!(ArrivalTime::parse("1430").is_err());
        assert!(ArrivalTime::parse("14:3").is_err());
        assert!(ArrivalTime::parse("14:300").is_err());
        assert!(ArrivalTime::parse("").is_err());

        // Missing colon
        assert!(ArrivalTime::parse("14-30").is_err());
        assert!(ArrivalTime::parse("14.30").is_err());

        // Non-digit characters
        assert!(ArrivalTime::parse("ab:cd").is_err());
        assert!(ArrivalTime::parse("1a:30").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        // Hour out of range
        assert!(ArrivalTime::parse("24:00").is_err());
        assert!(ArrivalTime::parse("99:00").is_err());

        // Minute out of range
        assert!(ArrivalTime::parse("12:60").is_err());
        assert!(ArrivalTime::parse("12:99").is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(ArrivalTime::parse("00:00").unwrap().to_string(), "00:00");
        assert_eq!(ArrivalTime::parse("09:05").unwrap().to_string(), "09:05");
        assert_eq!(ArrivalTime::parse("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn ordering() {
        let early = ArrivalTime::parse("06:15").unwrap();
        let late = ArrivalTime::parse("18:45").unwrap();

        assert!(early < late);
        assert!(late > early);
        assert_eq!(early.cmp(&early), Ordering::Equal);
    }

    #[test]
    fn minutes_from_midnight() {
        assert_eq!(ArrivalTime::parse("00:00").unwrap().minutes_from_midnight(), 0);
        assert_eq!(ArrivalTime::parse("01:30").unwrap().minutes_from_midnight(), 90);
        assert_eq!(
            ArrivalTime::parse("23:59").unwrap().minutes_from_midnight(),
            23 * 60 + 59
        );
    }

    #[test]
    fn equality() {
        let a = ArrivalTime::parse("14:30").unwrap();
        let b = ArrivalTime::parse("14:30").unwrap();
        let c = ArrivalTime::parse("14:31").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ArrivalTime::parse("14:30").unwrap());

        assert!(set.contains(&ArrivalTime::parse("14:30").unwrap()));
        assert!(!set.contains(&ArrivalTime::parse("14:31").unwrap()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(s in valid_time()) {
            prop_assert!(ArrivalTime::parse(&s).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(s in valid_time()) {
            let parsed = ArrivalTime::parse(&s).unwrap();
            prop_assert_eq!(parsed.to_string(), s);
        }

        /// Ordering agrees with minutes from midnight
        #[test]
        fn ordering_matches_minutes(a in valid_time(), b in valid_time()) {
            let ta = ArrivalTime::parse(&a).unwrap();
            let tb = ArrivalTime::parse(&b).unwrap();
            prop_assert_eq!(
                ta.cmp(&tb),
                ta.minutes_from_midnight().cmp(&tb.minutes_from_midnight())
            );
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ArrivalTime::parse(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ArrivalTime::parse(&s).is_err());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[0-9:]{0,4}|[0-9:]{6,10}") {
            prop_assert!(ArrivalTime::parse(&s).is_err());
        }
    }
}
