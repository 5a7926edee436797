//! Wallet command and transaction types.

use std::fmt;

/// Error returned when parsing an invalid wallet command status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid wallet command status: {value}")]
pub struct InvalidWalletStatus {
    value: String,
}

/// Resolution status of a withdrawal (wallet) command.
///
/// A command starts at `WaitToResolve`, moves to `WaitToPay` when an
/// operator approves it, and ends in one of the terminal states. The
/// status watcher keeps re-fetching a command until [`is_terminal`]
/// returns true.
///
/// [`is_terminal`]: WalletStatus::is_terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletStatus {
    WaitToResolve,
    WaitToPay,
    Rejected,
    Success,
    Returned,
}

impl WalletStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [WalletStatus; 5] = [
        WalletStatus::WaitToResolve,
        WalletStatus::WaitToPay,
        WalletStatus::Rejected,
        WalletStatus::Success,
        WalletStatus::Returned,
    ];

    /// Parse a status from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidWalletStatus> {
        match s {
            "WAIT_TO_RESOLVE" => Ok(WalletStatus::WaitToResolve),
            "WAIT_TO_PAY" => Ok(WalletStatus::WaitToPay),
            "REJECTED" => Ok(WalletStatus::Rejected),
            "SUCCESS" => Ok(WalletStatus::Success),
            "RETURNED" => Ok(WalletStatus::Returned),
            other => Err(InvalidWalletStatus {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletStatus::WaitToResolve => "WAIT_TO_RESOLVE",
            WalletStatus::WaitToPay => "WAIT_TO_PAY",
            WalletStatus::Rejected => "REJECTED",
            WalletStatus::Success => "SUCCESS",
            WalletStatus::Returned => "RETURNED",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            WalletStatus::WaitToResolve => "Awaiting review",
            WalletStatus::WaitToPay => "Awaiting payment",
            WalletStatus::Rejected => "Rejected",
            WalletStatus::Success => "Paid",
            WalletStatus::Returned => "Returned",
        }
    }

    /// True once the command can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WalletStatus::Rejected | WalletStatus::Success | WalletStatus::Returned
        )
    }

    /// True while an operator action or payment is still outstanding.
    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid transfer type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transfer type: {value}")]
pub struct InvalidTransferType {
    value: String,
}

/// Direction of a wallet transaction.
///
/// The payment service uses lowercase `in`/`out` on the wire, unlike the
/// other enums it exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferType {
    In,
    Out,
}

impl TransferType {
    /// Parse a transfer type from its wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidTransferType> {
        match s {
            "in" => Ok(TransferType::In),
            "out" => Ok(TransferType::Out),
            other => Err(InvalidTransferType {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::In => "in",
            TransferType::Out => "out",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TransferType::In => "Money in",
            TransferType::Out => "Money out",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
