//! Trip and trip schedule types.

use std::fmt;

/// Error returned when parsing an invalid trip code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip code: {reason}")]
pub struct InvalidTripCode {
    reason: &'static str,
}

/// Longest trip code the create/edit form accepts.
const MAX_CODE_LEN: usize = 64;

/// A trip's short code (e.g. "SGN-DL-01").
///
/// Codes are free-form but must be non-empty after trimming and fit in
/// [`MAX_CODE_LEN`] characters. Surrounding whitespace is stripped.
///
/// # Examples
///
/// ```
/// use admin_server::domain::TripCode;
///
/// let code = TripCode::parse("  SGN-DL-01 ").unwrap();
/// assert_eq!(code.as_str(), "SGN-DL-01");
///
/// assert!(TripCode::parse("").is_err());
/// assert!(TripCode::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripCode(String);

impl TripCode {
    /// Parse a trip code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidTripCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidTripCode {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().count() > MAX_CODE_LEN {
            return Err(InvalidTripCode {
                reason: "too long",
            });
        }

        Ok(TripCode(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an invalid bus type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bus type: {value}")]
pub struct InvalidBusType {
    value: String,
}

/// The vehicle class a schedule runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusType {
    Seat,
    Bed,
    Limousine,
}

impl BusType {
    /// All bus types, in the order forms present them.
    pub const ALL: [BusType; 3] = [BusType::Seat, BusType::Bed, BusType::Limousine];

    /// Parse a bus type from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidBusType> {
        match s {
            "SEAT" => Ok(BusType::Seat),
            "BED" => Ok(BusType::Bed),
            "LIMOUSINE" => Ok(BusType::Limousine),
            other => Err(InvalidBusType {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BusType::Seat => "SEAT",
            BusType::Bed => "BED",
            BusType::Limousine => "LIMOUSINE",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            BusType::Seat => "Seating coach",
            BusType::Bed => "Sleeper coach",
            BusType::Limousine => "Limousine",
        }
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid schedule status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid schedule status: {value}")]
pub struct InvalidScheduleStatus {
    value: String,
}

/// Whether a trip schedule is open for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleStatus {
    Active,
    Inactive,
}

impl ScheduleStatus {
    /// Parse a status from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidScheduleStatus> {
        match s {
            "ACTIVE" => Ok(ScheduleStatus::Active),
            "INACTIVE" => Ok(ScheduleStatus::Inactive),
            other => Err(InvalidScheduleStatus {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Active => "ACTIVE",
            ScheduleStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_code_trims() {
        let code = TripCode::parse("  SGN-DL-01  ").unwrap();
        assert_eq!(code.as_str(), "SGN-DL-01");
    }

    #[test]
    fn trip_code_rejects_empty() {
        assert!(TripCode::parse("").is_err());
        assert!(TripCode::parse("   ").is_err());
        assert!(TripCode::parse("\t\n").is_err());
    }

    #[test]
    fn trip_code_rejects_too_long() {
        let long = "X".repeat(MAX_CODE_LEN + 1);
        assert!(TripCode::parse(&long).is_err());

        let max = "X".repeat(MAX_CODE_LEN);
        assert!(TripCode::parse(&max).is_ok());
    }

    #[test]
    fn trip_code_display() {
        let code = TripCode::parse("HAN-HP").unwrap();
        assert_eq!(format!("{}", code), "HAN-HP");
    }

    #[test]
    fn bus_type_parse() {
        assert_eq!(BusType::parse("SEAT").unwrap(), BusType::Seat);
        assert_eq!(BusType::parse("BED").unwrap(), BusType::Bed);
        assert_eq!(BusType::parse("LIMOUSINE").unwrap(), BusType::Limousine);
        assert!(BusType::parse("seat").is_err());
        assert!(BusType::parse("COACH").is_err());
    }

    #[test]
    fn bus_type_roundtrip() {
        for t in BusType::ALL {
            assert_eq!(BusType::parse(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn schedule_status_parse() {
        assert_eq!(
            ScheduleStatus::parse("ACTIVE").unwrap(),
            ScheduleStatus::Active
        );
        assert_eq!(
            ScheduleStatus::parse("INACTIVE").unwrap(),
            ScheduleStatus::Inactive
        );
        assert!(ScheduleStatus::parse("PAUSED").is_err());
    }
}
