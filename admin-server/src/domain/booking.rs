//! Booking status type.

use std::fmt;

/// Error returned when parsing an invalid booking status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid booking status: {value}")]
pub struct InvalidBookingStatus {
    value: String,
}

/// Payment lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    WaitToPay,
    OutOfPay,
    Payed,
    Returned,
    Failed,
}

impl BookingStatus {
    /// All statuses, in the order the filter presents them.
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::WaitToPay,
        BookingStatus::OutOfPay,
        BookingStatus::Payed,
        BookingStatus::Returned,
        BookingStatus::Failed,
    ];

    /// Parse a status from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidBookingStatus> {
        match s {
            "WAIT_TO_PAY" => Ok(BookingStatus::WaitToPay),
            "OUT_OF_PAY" => Ok(BookingStatus::OutOfPay),
            "PAYED" => Ok(BookingStatus::Payed),
            "RETURNED" => Ok(BookingStatus::Returned),
            "FAILED" => Ok(BookingStatus::Failed),
            other => Err(InvalidBookingStatus {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::WaitToPay => "WAIT_TO_PAY",
            BookingStatus::OutOfPay => "OUT_OF_PAY",
            BookingStatus::Payed => "PAYED",
            BookingStatus::Returned => "RETURNED",
            BookingStatus::Failed => "FAILED",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::WaitToPay => "Awaiting payment",
            BookingStatus::OutOfPay => "Payment expired",
            BookingStatus::Payed => "Paid",
            BookingStatus::Returned => "Refunded",
            BookingStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
