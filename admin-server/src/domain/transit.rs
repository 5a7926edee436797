//! Transit role type.

use std::fmt;

/// Error returned when parsing an invalid transit type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transit type: {value}")]
pub struct InvalidTransitType {
    value: String,
}

/// The role a transit point plays on a trip: passengers board, alight, or both.
///
/// The trip service stores this as one of the strings `PICKUP`, `DROP`,
/// `BOTH`; `parse` accepts exactly those.
///
/// # Examples
///
/// ```
/// use admin_server::domain::TransitType;
///
/// let t = TransitType::parse("PICKUP").unwrap();
/// assert_eq!(t.as_str(), "PICKUP");
/// assert_eq!(t.label(), "Pickup");
///
/// // Unknown and lowercase values are rejected
/// assert!(TransitType::parse("pickup").is_err());
/// assert!(TransitType::parse("TRANSFER").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitType {
    Pickup,
    Drop,
    Both,
}

impl TransitType {
    /// All transit types, in the order forms present them.
    pub const ALL: [TransitType; 3] = [TransitType::Pickup, TransitType::Drop, TransitType::Both];

    /// Parse a transit type from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidTransitType> {
        match s {
            "PICKUP" => Ok(TransitType::Pickup),
            "DROP" => Ok(TransitType::Drop),
            "BOTH" => Ok(TransitType::Both),
            other => Err(InvalidTransitType {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitType::Pickup => "PICKUP",
            TransitType::Drop => "DROP",
            TransitType::Both => "BOTH",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TransitType::Pickup => "Pickup",
            TransitType::Drop => "Drop-off",
            TransitType::Both => "Pickup & drop-off",
        }
    }
}

impl fmt::Display for TransitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
