//! Backend gateway client.
//!
//! The dashboard holds no data of its own: trips, transit points, bookings,
//! and wallet commands all live behind a remote REST gateway. This module is
//! the one place that speaks its wire contracts:
//! - responses arrive in envelopes (`{"data": ...}` or `{"data", "page"}`)
//! - creates and updates both use POST; only withdrawal resolution is PATCH
//! - every call except login carries the operator's bearer token

mod client;
mod convert;
mod error;
mod types;

pub use client::{GatewayClient, GatewayConfig};
pub use convert::{ConvertError, loaded_transits, wallet_status};
pub use error::GatewayError;
pub use types::{
    BookingDto, BookingTripDto, Envelope, LoginResponse, PageInfo, PageQuery, Paged,
    StatisticPointDto, TicketDto, TransactionDto, TransitPointDto, TransitPointInput,
    TripDetailsDto, TripDto, TripScheduleDto, TripTransitDto, UserAuthority, WalletCommandDto,
};
