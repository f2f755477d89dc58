pub mod genesis;
pub mod manager;
pub mod snapshot;
pub mod state;
pub mod transaction_engine;
