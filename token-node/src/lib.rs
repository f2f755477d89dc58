pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod setup;

pub use config::NodeConfig;
pub use errors::NodeError;
