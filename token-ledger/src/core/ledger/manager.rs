use std::path::Path;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use token_common::{Address, Amount, Call, Invocation, LedgerEvent, Receipt, Result};

use crate::core::ledger::genesis::GenesisConfig;
use crate::core::ledger::state::LedgerState;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Shared handle to a ledger.
///
/// Every mutating call holds the write lock for its whole duration, so
/// operations are applied one at a time and never observed half done.
/// Committed events are broadcast before the lock is released, so
/// subscribers see them in commit order.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub(crate) state: Arc<RwLock<LedgerState>>,
    events: broadcast::Sender<LedgerEvent>,
}

impl Ledger {
    pub fn new(state: LedgerState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(state)),
            events,
        }
    }

    /// Deploys a fresh ledger from genesis parameters.
    pub fn deploy(genesis: &GenesisConfig) -> Self {
        Self::new(genesis.build())
    }

    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LedgerState::load_from_file(path)?))
    }

    pub async fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let state = self.state.read().await;
        state.save_to_file(path)
    }

    /// Receives every event committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Applies one invocation atomically and publishes its events.
    pub async fn execute(&self, invocation: Invocation) -> Result<Receipt> {
        let mut state = self.state.write().await;
        let receipt = state.execute(&invocation)?;

        for event in &receipt.events {
            tracing::debug!("📣 {} event: {:?}", event.name(), event);
            // No subscribers is fine.
            let _ = self.events.send(event.clone());
        }
        drop(state);

        Ok(receipt)
    }

    async fn call(&self, caller: &Address, call: Call) -> Result<Receipt> {
        self.execute(Invocation::new(*caller, call)).await
    }

    pub async fn approve(&self, caller: &Address, spender: Address, amount: Amount) -> Result<Receipt> {
        self.call(caller, Call::Approve { spender, amount }).await
    }

    pub async fn transfer(&self, caller: &Address, to: Address, amount: Amount) -> Result<Receipt> {
        self.call(caller, Call::Transfer { to, amount }).await
    }

    pub async fn transfer_from(
        &self,
        caller: &Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt> {
        self.call(caller, Call::TransferFrom { from, to, amount }).await
    }

    pub async fn mint(&self, caller: &Address, to: Address, amount: Amount) -> Result<Receipt> {
        self.call(caller, Call::Mint { to, amount }).await
    }

    pub async fn burn(&self, caller: &Address, from: Address, amount: Amount) -> Result<Receipt> {
        self.call(caller, Call::Burn { from, amount }).await
    }

    pub async fn buy(&self, caller: &Address, value: Amount) -> Result<Receipt> {
        self.call(caller, Call::Buy { value }).await
    }

    pub async fn sell(&self, caller: &Address, amount: Amount) -> Result<Receipt> {
        self.call(caller, Call::Sell { amount }).await
    }

    pub async fn edit_whitelist(&self, caller: &Address, account: Address) -> Result<Receipt> {
        self.call(caller, Call::EditWhitelist { account }).await
    }

    // --- Views ---

    pub async fn owner(&self) -> Address {
        self.state.read().await.owner()
    }

    pub async fn balance_of(&self, account: &Address) -> Amount {
        self.state.read().await.balance_of(account)
    }

    pub async fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.state.read().await.allowance(owner, spender)
    }

    pub async fn total_supply(&self) -> Amount {
        self.state.read().await.total_supply()
    }

    pub async fn is_whitelisted(&self, account: &Address) -> bool {
        self.state.read().await.is_whitelisted(account)
    }

    pub async fn held_funds(&self) -> Amount {
        self.state.read().await.held_funds()
    }

    /// Checks that `total_supply` equals the sum of balances.
    pub async fn verify_supply(&self) -> Result<()> {
        self.state.read().await.verify_supply()
    }
}
