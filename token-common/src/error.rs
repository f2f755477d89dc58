use thiserror::Error;

use crate::address::address::Address;
use crate::address::errors::AddressError;
use crate::Amount;

/// Errors produced by the ledger engine and the tooling around it.
///
/// The first six variants are guard failures: the operation was rejected
/// before any state changed. The remaining ones come from I/O and parsing
/// at the edges and are never raised by the engine itself.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller lacks the privilege the operation requires.
    #[error("Unauthorized: {caller} is not the ledger owner")]
    Unauthorized { caller: Address },

    /// Caller is neither whitelisted nor (where allowed) the owner.
    #[error("Not whitelisted: {caller} may not move funds")]
    NotWhitelisted { caller: Address },

    /// Balance too low for the requested debit.
    #[error("Insufficient funds for {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: Address,
        requested: Amount,
        available: Amount,
    },

    /// Delegated spend exceeds the granted allowance.
    #[error("Insufficient allowance for {spender}: requested {requested}, allowed {allowed}")]
    InsufficientAllowance {
        spender: Address,
        requested: Amount,
        allowed: Amount,
    },

    /// The ledger does not hold enough native funds to pay out.
    #[error("Insufficient reserve: requested {requested}, held {held}")]
    InsufficientReserve { requested: Amount, held: Amount },

    /// Arithmetic would exceed the representable range.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A loaded snapshot violates a ledger invariant.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Another process kept the snapshot lock past the wait limit.
    #[error("Snapshot is locked by another process: {0} (remove it if no process holds it)")]
    SnapshotLocked(String),
}

impl LedgerError {
    /// True for the guard failures raised by ledger operations.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::Unauthorized { .. }
                | LedgerError::NotWhitelisted { .. }
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::InsufficientAllowance { .. }
                | LedgerError::InsufficientReserve { .. }
                | LedgerError::Overflow(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
