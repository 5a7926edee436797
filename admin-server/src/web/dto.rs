//! Data transfer objects for web requests and responses.
//!
//! Form bodies come from the HTML pages; JSON bodies come from the editor's
//! fetch calls. Everything user-typed is validated here into domain types
//! before it reaches the editor or the gateway.

use serde::{Deserialize, Serialize};

use crate::domain::{ArrivalTime, BusType, ScheduleStatus, TransitPointKind, TransitType, TripCode, Vnd};
use crate::editor::{NewEntry, PointSnapshot, TransitEntry};
use crate::gateway::{TransitPointInput, TripDto, TripScheduleDto};

/// Error response body for JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A required form field was missing or malformed.
///
/// Blocks only the operation it belongs to; the page stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Trip create/edit form body.
#[derive(Debug, Deserialize)]
pub struct TripForm {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl TripForm {
    /// Validate into the gateway's trip payload.
    pub fn to_trip(&self, id: &str) -> Result<TripDto, FieldError> {
        let code =
            TripCode::parse(&self.code).map_err(|e| FieldError::new("code", e.to_string()))?;
        if self.name.trim().is_empty() {
            return Err(FieldError::new("name", "must not be empty"));
        }

        Ok(TripDto {
            id: id.to_string(),
            code: code.as_str().to_string(),
            name: self.name.trim().to_string(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.trim().to_string())
            },
            created_at: None,
        })
    }
}

/// Trip schedule create/edit form body.
#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    pub from_date: String,
    pub to_date: String,
    pub price: i64,
    pub bus_type: String,
    pub status: String,
}

impl ScheduleForm {
    /// Validate into the gateway's schedule payload.
    pub fn to_schedule(&self, trip_id: &str) -> Result<TripScheduleDto, FieldError> {
        let bus_type = BusType::parse(&self.bus_type)
            .map_err(|e| FieldError::new("bus_type", e.to_string()))?;
        let status = ScheduleStatus::parse(&self.status)
            .map_err(|e| FieldError::new("status", e.to_string()))?;

        if self.from_date.trim().is_empty() {
            return Err(FieldError::new("from_date", "must not be empty"));
        }
        if self.to_date.trim().is_empty() {
            return Err(FieldError::new("to_date", "must not be empty"));
        }
        if Vnd::new(self.price) < Vnd::MIN_SCHEDULE_PRICE {
            return Err(FieldError::new(
                "price",
                format!("must be at least {}", Vnd::MIN_SCHEDULE_PRICE),
            ));
        }

        Ok(TripScheduleDto {
            id: None,
            trip_id: Some(trip_id.to_string()),
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
            price: self.price,
            bus_type: bus_type.as_str().to_string(),
            status: status.as_str().to_string(),
        })
    }
}

/// Transit point create/edit form body.
#[derive(Debug, Deserialize)]
pub struct PointForm {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub hotline: String,
    pub kind: String,
}

impl PointForm {
    /// Validate into the gateway's transit point payload.
    pub fn to_point(&self) -> Result<TransitPointInput, FieldError> {
        let kind = TransitPointKind::parse(&self.kind)
            .map_err(|e| FieldError::new("kind", e.to_string()))?;
        if self.name.trim().is_empty() {
            return Err(FieldError::new("name", "must not be empty"));
        }
        if self.address.trim().is_empty() {
            return Err(FieldError::new("address", "must not be empty"));
        }

        Ok(TransitPointInput {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            hotline: self.hotline.trim().to_string(),
            kind: kind.as_str().to_string(),
        })
    }
}

/// Autocomplete query for the editor's add dialog.
#[derive(Debug, Deserialize)]
pub struct PointSearchRequest {
    pub q: String,
    pub limit: Option<u32>,
}

/// One autocomplete option.
#[derive(Debug, Serialize)]
pub struct PointOption {
    pub id: String,
    pub name: String,
    pub address: String,
}

/// Request to append an entry to an editing session.
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub transit_point_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub arrival_time: String,
    pub transit_type: String,
}

impl AddEntryRequest {
    /// Validate into an editor input.
    ///
    /// These mirror the add dialog's required-field checks: point selected,
    /// arrival time well-formed, type selected.
    pub fn to_new_entry(&self) -> Result<NewEntry, FieldError> {
        if self.transit_point_id.trim().is_empty() {
            return Err(FieldError::new("transit_point_id", "select a transit point"));
        }
        let arrival_time = ArrivalTime::parse(&self.arrival_time)
            .map_err(|e| FieldError::new("arrival_time", e.to_string()))?;
        let transit_type = TransitType::parse(&self.transit_type)
            .map_err(|e| FieldError::new("transit_type", e.to_string()))?;

        Ok(NewEntry {
            transit_point_id: self.transit_point_id.clone(),
            point: PointSnapshot {
                name: self.name.clone(),
                address: self.address.clone(),
            },
            arrival_time,
            transit_type,
        })
    }
}

/// Request to move an entry. A missing destination is a cancelled drag.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub source: usize,
    pub destination: Option<usize>,
}

/// Request to edit one entry's fields in place.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub arrival_time: Option<String>,
    pub transit_type: Option<String>,
}

/// One entry of an editing session, as the editor page sees it.
#[derive(Debug, Serialize)]
pub struct EntryDto {
    /// Session-stable key; the drag-and-drop identity
    pub key: String,
    pub transit_point_id: String,
    pub name: String,
    pub address: String,
    pub arrival_time: String,
    pub transit_type: String,
    pub transit_type_label: String,
    pub transit_order: usize,
}

impl EntryDto {
    pub fn from_entry(entry: &TransitEntry) -> Self {
        Self {
            key: entry.key.encode(),
            transit_point_id: entry.transit_point_id.clone(),
            name: entry.point.name.clone(),
            address: entry.point.address.clone(),
            arrival_time: entry.arrival_time.to_string(),
            transit_type: entry.transit_type.as_str().to_string(),
            transit_type_label: entry.transit_type.label().to_string(),
            transit_order: entry.transit_order,
        }
    }
}

/// The full state of an editing session, returned by every editor endpoint.
#[derive(Debug, Serialize)]
pub struct SequenceResponse {
    pub session_id: String,
    pub trip_id: String,
    pub dirty: bool,
    pub entries: Vec<EntryDto>,
}

/// Status report for a watched withdrawal.
#[derive(Debug, Serialize)]
pub struct WithdrawStatusResponse {
    /// Wire-form status, absent until the first fetch lands
    pub status: Option<String>,
    pub label: Option<String>,
    pub terminal: bool,
    /// Whether a watcher is still polling this command
    pub watching: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EntryKey;

    #[test]
    fn trip_form_validates() {
        let form = TripForm {
            code: " SGN-DL-01 ".into(),
            name: " Saigon - Dalat ".into(),
            description: "".into(),
        };
        let trip = form.to_trip("t-1").unwrap();
        assert_eq!(trip.code, "SGN-DL-01");
        assert_eq!(trip.name, "Saigon - Dalat");
        assert_eq!(trip.description, None);

        let bad = TripForm {
            code: "   ".into(),
            name: "x".into(),
            description: "".into(),
        };
        assert_eq!(bad.to_trip("t-1").unwrap_err().field, "code");
    }

    #[test]
    fn schedule_form_enforces_minimum_price() {
        let form = ScheduleForm {
            from_date: "2026-09-01".into(),
            to_date: "2026-09-30".into(),
            price: 99_999,
            bus_type: "SEAT".into(),
            status: "ACTIVE".into(),
        };
        let err = form.to_schedule("t-1").unwrap_err();
        assert_eq!(err.field, "price");

        let ok = ScheduleForm {
            price: 100_000,
            from_date: "2026-09-01".into(),
            to_date: "2026-09-30".into(),
            bus_type: "SEAT".into(),
            status: "ACTIVE".into(),
        };
        let schedule = ok.to_schedule("t-1").unwrap();
        assert_eq!(schedule.trip_id.as_deref(), Some("t-1"));
        assert_eq!(schedule.bus_type, "SEAT");
    }

    #[test]
    fn schedule_form_rejects_unknown_enum_values() {
        let form = ScheduleForm {
            from_date: "2026-09-01".into(),
            to_date: "2026-09-30".into(),
            price: 150_000,
            bus_type: "COACH".into(),
            status: "ACTIVE".into(),
        };
        assert_eq!(form.to_schedule("t-1").unwrap_err().field, "bus_type");
    }

    #[test]
    fn point_form_validates() {
        let form = PointForm {
            name: "Central station".into(),
            address: "1 Main road".into(),
            hotline: "1900".into(),
            kind: "STATION".into(),
        };
        let point = form.to_point().unwrap();
        assert_eq!(point.kind, "STATION");

        let bad = PointForm {
            name: "".into(),
            address: "1 Main road".into(),
            hotline: "".into(),
            kind: "STATION".into(),
        };
        assert_eq!(bad.to_point().unwrap_err().field, "name");
    }

    #[test]
    fn add_entry_request_required_fields() {
        let req = AddEntryRequest {
            transit_point_id: "".into(),
            name: "Central".into(),
            address: "".into(),
            arrival_time: "06:00".into(),
            transit_type: "PICKUP".into(),
        };
        assert_eq!(req.to_new_entry().unwrap_err().field, "transit_point_id");

        let req = AddEntryRequest {
            transit_point_id: "pt-1".into(),
            name: "Central".into(),
            address: "".into(),
            arrival_time: "6am".into(),
            transit_type: "PICKUP".into(),
        };
        assert_eq!(req.to_new_entry().unwrap_err().field, "arrival_time");

        let req = AddEntryRequest {
            transit_point_id: "pt-1".into(),
            name: "Central".into(),
            address: "".into(),
            arrival_time: "06:00".into(),
            transit_type: "".into(),
        };
        assert_eq!(req.to_new_entry().unwrap_err().field, "transit_type");
    }

    #[test]
    fn add_entry_request_valid() {
        let req = AddEntryRequest {
            transit_point_id: "pt-1".into(),
            name: "Central".into(),
            address: "1 Main road".into(),
            arrival_time: "06:30".into(),
            transit_type: "BOTH".into(),
        };
        let entry = req.to_new_entry().unwrap();
        assert_eq!(entry.transit_point_id, "pt-1");
        assert_eq!(entry.arrival_time.to_string(), "06:30");
        assert_eq!(entry.transit_type, TransitType::Both);
    }

    #[test]
    fn entry_dto_carries_stable_key() {
        let entry = TransitEntry {
            key: EntryKey::Persisted("tt-1".into()),
            transit_point_id: "pt-1".into(),
            point: PointSnapshot {
                name: "Central".into(),
                address: "1 Main road".into(),
            },
            arrival_time: ArrivalTime::parse("06:00").unwrap(),
            transit_type: TransitType::Pickup,
            transit_order: 0,
        };

        let dto = EntryDto::from_entry(&entry);
        assert_eq!(dto.key, "p:tt-1");
        assert_eq!(dto.transit_type, "PICKUP");
        assert_eq!(dto.transit_type_label, "Pickup");
        assert_eq!(dto.transit_order, 0);
    }
}
