use std::path::Path;

use serde::{Deserialize, Serialize};
use token_common::{Address, Amount, Result};

use crate::core::ledger::state::LedgerState;

/// Units credited to the owner at deployment unless configured otherwise.
pub const DEFAULT_INITIAL_SUPPLY: Amount = 1_000_000;

fn default_initial_supply() -> Amount {
    DEFAULT_INITIAL_SUPPLY
}

/// Deployment parameters for a fresh ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The deployer. Becomes the fixed owner and reserve account.
    pub owner: Address,
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Amount,
}

impl GenesisConfig {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            initial_supply: DEFAULT_INITIAL_SUPPLY,
        }
    }

    pub fn with_supply(mut self, initial_supply: Amount) -> Self {
        self.initial_supply = initial_supply;
        self
    }

    /// Reads deployment parameters from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn build(&self) -> LedgerState {
        tracing::info!(
            "🌱 Genesis: owner {} with initial supply {}",
            self.owner, self.initial_supply
        );
        LedgerState::new(self.owner, self.initial_supply)
    }
}

impl From<&GenesisConfig> for LedgerState {
    fn from(genesis: &GenesisConfig) -> Self {
        genesis.build()
    }
}
