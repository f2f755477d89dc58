use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::NodeConfig;
use crate::errors::NodeError;

/// Loads the config at `path`, writing the defaults there first if missing.
/// The flag is true when the file was just created.
pub fn ensure_config(path: &str) -> Result<(NodeConfig, bool), NodeError> {
    if !Path::new(path).exists() {
        let config = NodeConfig::default();
        config.save_to_file(path)?;
        return Ok((config, true));
    }
    Ok((NodeConfig::load_from_file(path)?, false))
}

/// Installs the stdout subscriber. `RUST_LOG` wins over the config filter.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
