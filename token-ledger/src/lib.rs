//! Single-owner token ledger.
//!
//! [`LedgerState`] holds the balances, allowances, whitelist and native
//! funds reserve, and exposes every guarded transition as a synchronous
//! `&mut self` method. [`Ledger`] wraps it behind one async lock so that
//! concurrent callers are serialized and can subscribe to emitted events.

pub mod core;

pub use crate::core::ledger::genesis::{GenesisConfig, DEFAULT_INITIAL_SUPPLY};
pub use crate::core::ledger::manager::Ledger;
pub use crate::core::ledger::snapshot::SnapshotLock;
pub use crate::core::ledger::state::LedgerState;
