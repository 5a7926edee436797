//! Conversion from gateway wire types to validated domain types.
//!
//! The gateway is a black box: anything it sends is re-validated here before
//! the rest of the crate touches it.

use crate::domain::{ArrivalTime, TransitType, WalletStatus};
use crate::editor::{LoadedTransit, PointSnapshot};

use super::types::{TripDetailsDto, TripTransitDto, WalletCommandDto};

/// Error converting a gateway response into domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("transit {index}: {source}")]
    ArrivalTime {
        index: usize,
        source: crate::domain::InvalidArrivalTime,
    },

    #[error("transit {index}: {source}")]
    TransitType {
        index: usize,
        source: crate::domain::InvalidTransitType,
    },

    #[error("wallet command {id}: {source}")]
    WalletStatus {
        id: String,
        source: crate::domain::InvalidWalletStatus,
    },
}

/// Convert a trip's transits into editor inputs, preserving server order.
pub fn loaded_transits(trip: &TripDetailsDto) -> Result<Vec<LoadedTransit>, ConvertError> {
    trip.trip_transits
        .iter()
        .enumerate()
        .map(|(index, t)| convert_transit(t, index))
        .collect()
}

fn convert_transit(dto: &TripTransitDto, index: usize) -> Result<LoadedTransit, ConvertError> {
    let arrival_time = ArrivalTime::parse(&dto.arrival_time)
        .map_err(|source| ConvertError::ArrivalTime { index, source })?;
    let transit_type = TransitType::parse(&dto.transit_type)
        .map_err(|source| ConvertError::TransitType { index, source })?;

    // The display snapshot may be absent on freshly imported data; an empty
    // snapshot renders as an unnamed stop rather than failing the load.
    let point = dto
        .transit_point
        .as_ref()
        .map(|p| PointSnapshot {
            name: p.name.clone(),
            address: p.address.clone(),
        })
        .unwrap_or_else(|| PointSnapshot {
            name: String::new(),
            address: String::new(),
        });

    Ok(LoadedTransit {
        id: dto.id.clone(),
        transit_point_id: dto.transit_point_id.clone(),
        point,
        arrival_time,
        transit_type,
    })
}

/// Parse a wallet command's status field.
pub fn wallet_status(dto: &WalletCommandDto) -> Result<WalletStatus, ConvertError> {
    WalletStatus::parse(&dto.status).map_err(|source| ConvertError::WalletStatus {
        id: dto.id.clone(),
        source,
    })
}
