use serde::{Deserialize, Serialize};

use crate::address::address::Address;
use crate::event::LedgerEvent;
use crate::Amount;

/// A mutating ledger operation with its typed arguments.
///
/// Only `Buy` carries attached native funds, so a non-payable operation
/// cannot receive value.
///
/// Externally tagged (`{"mint": {..}}`): amounts are `u128`, which serde
/// cannot read back through the buffering that internal tagging needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    Approve { spender: Address, amount: Amount },
    Transfer { to: Address, amount: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },
    Mint { to: Address, amount: Amount },
    Burn { from: Address, amount: Amount },
    Buy { value: Amount },
    Sell { amount: Amount },
    EditWhitelist { account: Address },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::Approve { .. } => "approve",
            Call::Transfer { .. } => "transfer",
            Call::TransferFrom { .. } => "transfer_from",
            Call::Mint { .. } => "mint",
            Call::Burn { .. } => "burn",
            Call::Buy { .. } => "buy",
            Call::Sell { .. } => "sell",
            Call::EditWhitelist { .. } => "edit_whitelist",
        }
    }
}

/// A call together with the identity that submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub caller: Address,
    pub call: Call,
}

impl Invocation {
    pub fn new(caller: Address, call: Call) -> Self {
        Self { caller, call }
    }
}

/// Outcome of a committed operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Events emitted, in order.
    pub events: Vec<LedgerEvent>,
    /// Native funds owed to the caller. Only `sell` pays out.
    pub payout: Amount,
}

impl Receipt {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_event(event: LedgerEvent) -> Self {
        Self {
            events: vec![event],
            payout: 0,
        }
    }

    pub fn with_payout(payout: Amount) -> Self {
        Self {
            events: Vec::new(),
            payout,
        }
    }
}
