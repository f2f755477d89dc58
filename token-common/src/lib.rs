pub mod address;
pub mod error;
pub mod event;
pub mod transactions;

pub use address::address::Address;
pub use error::{LedgerError, Result};
pub use event::LedgerEvent;
pub use transactions::{Call, Invocation, Receipt};

/// Quantity type shared by ledger units and native funds.
pub type Amount = u128;
