//! Domain types for the BusGo admin dashboard.
//!
//! This module contains the core domain model types that represent
//! validated platform data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod booking;
mod money;
mod payment;
mod point;
mod time;
mod transit;
mod trip;

pub use booking::{BookingStatus, InvalidBookingStatus};
pub use money::Vnd;
pub use payment::{InvalidTransferType, InvalidWalletStatus, TransferType, WalletStatus};
pub use point::{InvalidTransitPointKind, TransitPointKind};
pub use time::{ArrivalTime, InvalidArrivalTime};
pub use transit::{InvalidTransitType, TransitType};
pub use trip::{BusType, InvalidBusType, InvalidScheduleStatus, InvalidTripCode, ScheduleStatus, TripCode};
