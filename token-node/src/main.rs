use clap::Parser;
use tracing::{error, info};

use token_node::{
    cli::Cli,
    commands,
    setup::{ensure_config, init_tracing},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Parse Arguments
    let cli = Cli::parse();

    // 2. Config, then logging with the configured filter
    let (config, created) = ensure_config(&cli.config)?;
    init_tracing(&config.log_filter);
    if created {
        info!("⚠️ Config not found. Wrote defaults to {}", cli.config);
    }
    info!("Snapshot: {}", config.snapshot_path);

    // 3. Execute
    match commands::run(cli.command, &config).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e.into())
        }
    }
}
