//! Fixed 1:1 exchange between ledger units and native funds.
//!
//! `buy` sells units out of the owner's balance (the reserve account) and
//! keeps the attached native funds. `sell` retires the caller's units and
//! pays out of the held funds.

use token_common::{Address, Amount, LedgerEvent, Receipt, Result};

use super::validation::ValidationHandler;
use crate::core::ledger::state::LedgerState;

impl LedgerState {
    /// Purchases `value` units with `value` attached native funds.
    ///
    /// The units are transferred from the reserve to the caller, so the
    /// supply is unchanged. An owner buying from itself only moves native
    /// funds in.
    pub fn buy(&mut self, caller: &Address, value: Amount) -> Result<Receipt> {
        let reserve = self.owner();
        ValidationHandler::sufficient_balance(self, &reserve, value)?;
        let held = ValidationHandler::checked_add(self.held_funds(), value, "held funds")?;

        self.move_units(reserve, *caller, value)?;
        self.set_held_funds(held);

        tracing::info!("💰 BUY: {} bought {} units | Held funds: {}", caller, value, held);

        if value == 0 || reserve == *caller {
            return Ok(Receipt::empty());
        }
        Ok(Receipt::with_event(LedgerEvent::Transfer {
            from: reserve,
            to: *caller,
            amount: value,
        }))
    }

    /// Sells `amount` units back for the same amount of native funds.
    ///
    /// The units are retired and `total_supply` shrinks with them. The
    /// receipt's `payout` is what the invocation layer owes the caller.
    pub fn sell(&mut self, caller: &Address, amount: Amount) -> Result<Receipt> {
        let available = ValidationHandler::sufficient_balance(self, caller, amount)?;
        let held = ValidationHandler::sufficient_reserve(self, amount)?;

        self.set_balance(*caller, available - amount);
        self.set_total_supply(self.total_supply() - amount);
        self.set_held_funds(held - amount);

        tracing::info!("💸 SELL: {} sold {} units | Held funds: {}", caller, amount, held - amount);
        Ok(Receipt::with_payout(amount))
    }
}
