use token_common::{Address, Amount, LedgerError, Result};

use crate::core::ledger::state::LedgerState;

/// Guard predicates evaluated before any ledger mutation.
///
/// Each check either passes or returns the specific rejection; none of them
/// touch state or log. Rejections are logged once, where `execute` sees them.
pub struct ValidationHandler;

impl ValidationHandler {
    /// Caller must be the ledger owner.
    pub fn only_owner(state: &LedgerState, caller: &Address) -> Result<()> {
        if !state.is_owner(caller) {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Caller must be whitelisted. The owner gets no exemption here.
    pub fn whitelisted(state: &LedgerState, caller: &Address) -> Result<()> {
        if !state.is_whitelisted(caller) {
            return Err(LedgerError::NotWhitelisted { caller: *caller });
        }
        Ok(())
    }

    /// Caller must be the owner or whitelisted.
    pub fn owner_or_whitelisted(state: &LedgerState, caller: &Address) -> Result<()> {
        if state.is_owner(caller) {
            return Ok(());
        }
        Self::whitelisted(state, caller)
    }

    /// `account` must hold at least `amount`. Returns the current balance.
    pub fn sufficient_balance(
        state: &LedgerState,
        account: &Address,
        amount: Amount,
    ) -> Result<Amount> {
        let available = state.balance_of(account);
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                account: *account,
                requested: amount,
                available,
            });
        }
        Ok(available)
    }

    /// `spender` must have been granted at least `amount`. Returns the
    /// current allowance.
    pub fn sufficient_allowance(
        state: &LedgerState,
        spender: &Address,
        amount: Amount,
    ) -> Result<Amount> {
        let allowed = state.allowance(&state.owner(), spender);
        if amount > allowed {
            return Err(LedgerError::InsufficientAllowance {
                spender: *spender,
                requested: amount,
                allowed,
            });
        }
        Ok(allowed)
    }

    /// The ledger must hold at least `amount` native funds.
    pub fn sufficient_reserve(state: &LedgerState, amount: Amount) -> Result<Amount> {
        let held = state.held_funds();
        if amount > held {
            return Err(LedgerError::InsufficientReserve {
                requested: amount,
                held,
            });
        }
        Ok(held)
    }

    pub fn checked_add(a: Amount, b: Amount, what: &'static str) -> Result<Amount> {
        a.checked_add(b).ok_or(LedgerError::Overflow(what))
    }
}
