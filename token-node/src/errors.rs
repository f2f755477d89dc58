use thiserror::Error;
use token_common::LedgerError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Config error: {0}")]
    Config(String),

    /// `deploy` refuses to overwrite an existing snapshot without `--force`.
    #[error("Snapshot already exists at {0} (use --force to overwrite)")]
    SnapshotExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
