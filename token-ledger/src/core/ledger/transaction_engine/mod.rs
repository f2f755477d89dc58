use token_common::{Address, Amount, Call, Invocation, LedgerEvent, Receipt, Result};

use crate::core::ledger::state::LedgerState;

pub mod exchange;
pub mod validation;

use validation::ValidationHandler;

impl LedgerState {
    /// Dispatches an invocation to its operation.
    ///
    /// On error the state is left exactly as it was.
    pub fn execute(&mut self, invocation: &Invocation) -> Result<Receipt> {
        let caller = invocation.caller;
        let result = match invocation.call {
            Call::Approve { spender, amount } => self.approve(&caller, spender, amount),
            Call::Transfer { to, amount } => self.transfer(&caller, to, amount),
            Call::TransferFrom { from, to, amount } => self.transfer_from(&caller, from, to, amount),
            Call::Mint { to, amount } => self.mint(&caller, to, amount),
            Call::Burn { from, amount } => self.burn(&caller, from, amount),
            Call::Buy { value } => self.buy(&caller, value),
            Call::Sell { amount } => self.sell(&caller, amount),
            Call::EditWhitelist { account } => self.edit_whitelist(&caller, account),
        };

        if let Err(e) = &result {
            tracing::warn!("❌ {} by {} rejected: {}", invocation.call.name(), caller, e);
        }
        result
    }

    /// Sets `spender`'s allowance over the owner's balance. Absolute, not
    /// additive.
    pub fn approve(&mut self, caller: &Address, spender: Address, amount: Amount) -> Result<Receipt> {
        ValidationHandler::only_owner(self, caller)?;
        ValidationHandler::sufficient_balance(self, &self.owner(), amount)?;

        self.set_allowance(spender, amount);

        tracing::info!("✍️ APPROVE: {} may spend {} of owner funds", spender, amount);
        Ok(Receipt::with_event(LedgerEvent::Approval {
            owner: self.owner(),
            spender,
            amount,
        }))
    }

    /// Moves `amount` from the caller to `to`. Open to the owner and to
    /// whitelisted accounts.
    pub fn transfer(&mut self, caller: &Address, to: Address, amount: Amount) -> Result<Receipt> {
        ValidationHandler::owner_or_whitelisted(self, caller)?;
        self.move_units(*caller, to, amount)?;

        tracing::info!("📤 TRANSFER: {} -> {} | Amount: {}", caller, to, amount);
        Ok(Receipt::with_event(LedgerEvent::Transfer {
            from: *caller,
            to,
            amount,
        }))
    }

    /// Moves `amount` from `from` to `to`, spending the caller's allowance.
    ///
    /// Only the caller's single allowance bucket is consulted; `from` is not
    /// matched against any per-owner grant.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt> {
        ValidationHandler::whitelisted(self, caller)?;
        let allowed = ValidationHandler::sufficient_allowance(self, caller, amount)?;
        self.move_units(from, to, amount)?;
        self.set_allowance(*caller, allowed - amount);

        tracing::info!(
            "📤 TRANSFER_FROM: {} -> {} | Amount: {} | Spender: {} | Allowance left: {}",
            from, to, amount, caller, allowed - amount
        );
        Ok(Receipt::with_event(LedgerEvent::Transfer { from, to, amount }))
    }

    /// Creates `amount` new units in `to`'s balance.
    pub fn mint(&mut self, caller: &Address, to: Address, amount: Amount) -> Result<Receipt> {
        ValidationHandler::only_owner(self, caller)?;
        let supply = ValidationHandler::checked_add(self.total_supply(), amount, "mint supply")?;
        // Cannot overflow once the supply fits, but stay checked.
        let balance = ValidationHandler::checked_add(self.balance_of(&to), amount, "mint balance")?;

        self.set_balance(to, balance);
        self.set_total_supply(supply);

        tracing::info!("🪙 MINT: {} to {} | Supply: {}", amount, to, supply);
        Ok(Receipt::empty())
    }

    /// Destroys `amount` units from `from`'s balance.
    pub fn burn(&mut self, caller: &Address, from: Address, amount: Amount) -> Result<Receipt> {
        ValidationHandler::only_owner(self, caller)?;
        let available = ValidationHandler::sufficient_balance(self, &from, amount)?;

        self.set_balance(from, available - amount);
        self.set_total_supply(self.total_supply() - amount);

        tracing::info!("🔥 BURN: {} from {} | Supply: {}", amount, from, self.total_supply());
        Ok(Receipt::empty())
    }

    /// Flips `account`'s whitelist flag. Anyone may call it.
    pub fn edit_whitelist(&mut self, caller: &Address, account: Address) -> Result<Receipt> {
        let listed = self.toggle_whitelist(account);

        tracing::info!("📋 WHITELIST: {} set {} to {}", caller, account, listed);
        Ok(Receipt::empty())
    }

    /// Debits `from` and credits `to`. Every check runs before either write.
    pub(crate) fn move_units(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        let available = ValidationHandler::sufficient_balance(self, &from, amount)?;
        if from == to {
            return Ok(());
        }
        let credited = ValidationHandler::checked_add(self.balance_of(&to), amount, "transfer")?;

        self.set_balance(from, available - amount);
        self.set_balance(to, credited);
        Ok(())
    }
}
