use std::{fs, io, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::errors::NodeError;

fn default_snapshot_path() -> String {
    "data/ledger.json".to_string()
}

fn default_log_filter() -> String {
    "info,token_ledger=info,token_node=debug".to_string()
}

fn default_lock_timeout_ms() -> u64 {
    5_000
}

/// Settings for the ledger CLI, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Where the ledger snapshot lives.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// `tracing-subscriber` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// How long a command waits for another process to release the
    /// snapshot before giving up.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            log_filter: default_log_filter(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl NodeConfig {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, NodeError> {
        let data = fs::read_to_string(path.as_ref())?;
        serde_json::from_str::<NodeConfig>(&data).map_err(|e| {
            NodeError::Config(format!("{}: {}", path.as_ref().display(), e))
        })
    }
}
