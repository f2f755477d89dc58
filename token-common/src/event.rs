use serde::{Deserialize, Serialize};

use crate::address::address::Address;
use crate::Amount;

/// Structured log emitted by committed ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    /// The owner set a spender's allowance.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    /// Ledger units moved between accounts.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
}

impl LedgerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Approval { .. } => "Approval",
            LedgerEvent::Transfer { .. } => "Transfer",
        }
    }
}
