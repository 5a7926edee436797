//! Transit point category type.

use std::fmt;

/// Error returned when parsing an invalid transit point kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transit point kind: {value}")]
pub struct InvalidTransitPointKind {
    value: String,
}

/// The category of a transit point in the directory.
///
/// Stored on the wire as `PLACE`, `STATION`, `OFFICE`, or `TRANSPORT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitPointKind {
    Place,
    Station,
    Office,
    Transport,
}

impl TransitPointKind {
    /// All kinds, in the order forms present them.
    pub const ALL: [TransitPointKind; 4] = [
        TransitPointKind::Place,
        TransitPointKind::Station,
        TransitPointKind::Office,
        TransitPointKind::Transport,
    ];

    /// Parse a kind from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidTransitPointKind> {
        match s {
            "PLACE" => Ok(TransitPointKind::Place),
            "STATION" => Ok(TransitPointKind::Station),
            "OFFICE" => Ok(TransitPointKind::Office),
            "TRANSPORT" => Ok(TransitPointKind::Transport),
            other => Err(InvalidTransitPointKind {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitPointKind::Place => "PLACE",
            TransitPointKind::Station => "STATION",
            TransitPointKind::Office => "OFFICE",
            TransitPointKind::Transport => "TRANSPORT",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TransitPointKind::Place => "Place",
            TransitPointKind::Station => "Station",
            TransitPointKind::Office => "Office",
            TransitPointKind::Transport => "Transport hub",
        }
    }
}

impl fmt::Display for TransitPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_kinds() {
        assert_eq!(
            TransitPointKind::parse("PLACE").unwrap(),
            TransitPointKind::Place
        );
        assert_eq!(
            TransitPointKind::parse("STATION").unwrap(),
            TransitPointKind::Station
        );
        assert_eq!(
            TransitPointKind::parse("OFFICE").unwrap(),
            TransitPointKind::Office
        );
        assert_eq!(
            TransitPointKind::parse("TRANSPORT").unwrap(),
            TransitPointKind::Transport
        );
    }

    #[test]
    fn reject_unknown() {
        assert!(TransitPointKind::parse("").is_err());
        assert!(TransitPointKind::parse("DEPOT").is_err());
        assert!(TransitPointKind::parse("place").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        for k in TransitPointKind::ALL {
            assert_eq!(TransitPointKind::parse(k.as_str()).unwrap(), k);
        }
    }
}
