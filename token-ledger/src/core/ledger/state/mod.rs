use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use token_common::{Address, Amount, LedgerError, Result};

/// The whole ledger.
///
/// Fields are private: every mutation goes through the operations in
/// `transaction_engine`, which evaluate their guards before touching
/// anything. `total_supply` always equals the sum of `balances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    owner: Address,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    // Spender -> how much of the owner's balance it may move.
    allowances: HashMap<Address, Amount>,
    whitelist: HashMap<Address, bool>,
    held_funds: Amount,
}

impl LedgerState {
    /// Creates a ledger owned by `owner` with `initial_supply` units in the
    /// owner's balance.
    pub fn new(owner: Address, initial_supply: Amount) -> Self {
        let mut balances = HashMap::new();
        balances.insert(owner, initial_supply);

        Self {
            owner,
            total_supply: initial_supply,
            balances,
            allowances: HashMap::new(),
            whitelist: HashMap::new(),
            held_funds: 0,
        }
    }

    // --- Views ---

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        *self.balances.get(account).unwrap_or(&0)
    }

    /// Allowance granted to `spender`.
    ///
    /// Allowances are always drawn from the owner's balance, so the first
    /// argument does not select a bucket. It is accepted so callers can use
    /// the familiar `(owner, spender)` shape.
    pub fn allowance(&self, _owner: &Address, spender: &Address) -> Amount {
        *self.allowances.get(spender).unwrap_or(&0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn is_whitelisted(&self, account: &Address) -> bool {
        *self.whitelist.get(account).unwrap_or(&false)
    }

    /// Native funds held by the ledger itself.
    pub fn held_funds(&self) -> Amount {
        self.held_funds
    }

    pub fn is_owner(&self, account: &Address) -> bool {
        self.owner == *account
    }

    /// Number of accounts that have ever held a balance entry.
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    /// Checks that `total_supply` matches the sum of all balances.
    pub fn verify_supply(&self) -> Result<()> {
        let sum = self
            .balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
            .ok_or_else(|| LedgerError::CorruptSnapshot("balance sum overflows".to_string()))?;

        if sum != self.total_supply {
            return Err(LedgerError::CorruptSnapshot(format!(
                "total supply {} does not match balance sum {}",
                self.total_supply, sum
            )));
        }
        Ok(())
    }

    // --- Raw mutators, only reachable from the engine after its guards ---

    pub(crate) fn set_balance(&mut self, account: Address, amount: Amount) {
        self.balances.insert(account, amount);
    }

    pub(crate) fn set_allowance(&mut self, spender: Address, amount: Amount) {
        self.allowances.insert(spender, amount);
    }

    pub(crate) fn set_total_supply(&mut self, amount: Amount) {
        self.total_supply = amount;
    }

    pub(crate) fn set_held_funds(&mut self, amount: Amount) {
        self.held_funds = amount;
    }

    pub(crate) fn toggle_whitelist(&mut self, account: Address) -> bool {
        let flag = self.whitelist.entry(account).or_insert(false);
        *flag = !*flag;
        *flag
    }
}
