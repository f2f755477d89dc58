use std::fmt::Write as _;
use std::path::Path;

use token_common::{Address, Invocation, LedgerEvent};
use token_ledger::{GenesisConfig, Ledger, SnapshotLock};
use tracing::{debug, info};

use crate::cli::{Commands, Operation};
use crate::config::NodeConfig;
use crate::errors::NodeError;

/// Runs one CLI command against the configured snapshot and returns the
/// text to print.
pub async fn run(command: Commands, config: &NodeConfig) -> Result<String, NodeError> {
    match command {
        Commands::Deploy { owner, supply, genesis, force } => {
            let genesis = match (genesis, owner) {
                (Some(file), _) => GenesisConfig::load_from_file(&file)?,
                (None, Some(owner)) => {
                    let genesis = GenesisConfig::new(owner);
                    match supply {
                        Some(supply) => genesis.with_supply(supply),
                        None => genesis,
                    }
                }
                (None, None) => {
                    return Err(NodeError::Config("deploy needs --owner or --genesis".to_string()))
                }
            };
            deploy(config, genesis, force).await
        }
        Commands::Call { caller, op } => call(config, caller, op).await,
        Commands::Show { account } => show(config, account).await,
    }
}

async fn deploy(config: &NodeConfig, genesis: GenesisConfig, force: bool) -> Result<String, NodeError> {
    let path = Path::new(&config.snapshot_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let _lock = SnapshotLock::acquire(path, config.lock_timeout()).await?;
    if path.exists() && !force {
        return Err(NodeError::SnapshotExists(config.snapshot_path.clone()));
    }

    let ledger = Ledger::deploy(&genesis);
    ledger.save_snapshot(path).await?;
    info!("🚀 Ledger deployed to {}", config.snapshot_path);

    Ok(format!(
        "Deployed ledger owned by {} with supply {}",
        genesis.owner, genesis.initial_supply
    ))
}

/// Load, execute and save under the snapshot lock, so concurrent CLI
/// invocations cannot lose each other's updates.
async fn call(config: &NodeConfig, caller: Address, op: Operation) -> Result<String, NodeError> {
    let _lock = SnapshotLock::acquire(&config.snapshot_path, config.lock_timeout()).await?;
    let ledger = Ledger::load_snapshot(&config.snapshot_path)?;
    let invocation = Invocation::new(caller, op.into());
    let name = invocation.call.name();

    let receipt = ledger.execute(invocation).await?;
    ledger.save_snapshot(&config.snapshot_path).await?;
    debug!("Snapshot updated after {}", name);

    let mut out = format!("{} committed", name);
    for event in &receipt.events {
        let _ = write!(out, "\n  {}", describe(event));
    }
    if receipt.payout > 0 {
        let _ = write!(out, "\n  payout: {} native funds to {}", receipt.payout, caller);
    }
    Ok(out)
}

async fn show(config: &NodeConfig, account: Option<Address>) -> Result<String, NodeError> {
    let ledger = Ledger::load_snapshot(&config.snapshot_path)?;
    let owner = ledger.owner().await;

    let mut out = String::new();
    let _ = writeln!(out, "owner:        {}", owner);
    let _ = writeln!(out, "total supply: {}", ledger.total_supply().await);
    let _ = write!(out, "held funds:   {}", ledger.held_funds().await);

    if let Some(account) = account {
        let _ = write!(
            out,
            "\n{}\n  balance:     {}\n  allowance:   {}\n  whitelisted: {}",
            account,
            ledger.balance_of(&account).await,
            ledger.allowance(&owner, &account).await,
            ledger.is_whitelisted(&account).await,
        );
    }
    Ok(out)
}

fn describe(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::Approval { owner, spender, amount } => {
            format!("Approval(owner={}, spender={}, amount={})", owner, spender, amount)
        }
        LedgerEvent::Transfer { from, to, amount } => {
            format!("Transfer(from={}, to={}, amount={})", from, to, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use token_common::{Amount, LedgerError};

    fn config_in(dir: &tempfile::TempDir) -> NodeConfig {
        NodeConfig {
            snapshot_path: dir.path().join("data").join("ledger.json").display().to_string(),
            ..NodeConfig::default()
        }
    }

    fn deploy_by(owner: Address, supply: Option<Amount>, force: bool) -> Commands {
        Commands::Deploy { owner: Some(owner), supply, genesis: None, force }
    }

    #[tokio::test]
    async fn test_deploy_call_show() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let owner = Address::random();
        let other = Address::random();

        run(deploy_by(owner, None, false), &config)
            .await
            .unwrap();

        let out = run(
            Commands::Call { caller: owner, op: Operation::Approve { spender: other, amount: 1000 } },
            &config,
        )
        .await
        .unwrap();
        assert!(out.starts_with("approve committed"));
        assert!(out.contains("Approval("));

        let out = run(Commands::Show { account: Some(other) }, &config).await.unwrap();
        assert!(out.contains("total supply: 1000000"));
        assert!(out.contains("allowance:   1000"));
    }

    #[tokio::test]
    async fn test_deploy_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let owner = Address::random();

        run(deploy_by(owner, Some(5), false), &config)
            .await
            .unwrap();
        let err = run(deploy_by(owner, None, false), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeError::SnapshotExists(_)));

        run(deploy_by(owner, None, true), &config)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejected_call_leaves_snapshot_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let owner = Address::random();
        let stranger = Address::random();

        run(deploy_by(owner, None, false), &config)
            .await
            .unwrap();
        let before = std::fs::read_to_string(&config.snapshot_path).unwrap();

        let err = run(
            Commands::Call { caller: stranger, op: Operation::Mint { to: stranger, amount: 1 } },
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, NodeError::Ledger(LedgerError::Unauthorized { .. })));
        assert_eq!(std::fs::read_to_string(&config.snapshot_path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_sell_reports_payout() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let owner = Address::random();

        run(deploy_by(owner, None, false), &config)
            .await
            .unwrap();
        run(Commands::Call { caller: owner, op: Operation::Buy { value: 2000 } }, &config)
            .await
            .unwrap();
        let out = run(Commands::Call { caller: owner, op: Operation::Sell { amount: 1000 } }, &config)
            .await
            .unwrap();

        assert!(out.contains("payout: 1000"));
    }

    #[tokio::test]
    async fn test_deploy_from_genesis_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let owner = Address::random();
        let genesis_path = dir.path().join("genesis.json");
        std::fs::write(
            &genesis_path,
            format!(r#"{{ "owner": "{}", "initial_supply": 250 }}"#, owner),
        )
        .unwrap();

        let out = run(
            Commands::Deploy {
                owner: None,
                supply: None,
                genesis: Some(genesis_path.display().to_string()),
                force: false,
            },
            &config,
        )
        .await
        .unwrap();
        assert!(out.contains("with supply 250"));

        let ledger = Ledger::load_snapshot(&config.snapshot_path).unwrap();
        assert_eq!(ledger.owner().await, owner);
        assert_eq!(ledger.balance_of(&owner).await, 250);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_keep_every_update() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let owner = Address::random();
        run(deploy_by(owner, None, false), &config).await.unwrap();

        let recipients: Vec<Address> = (0..16).map(|_| Address::random()).collect();
        let handles: Vec<_> = recipients
            .iter()
            .map(|to| {
                let config = config.clone();
                let op = Operation::Transfer { to: *to, amount: 10 };
                tokio::spawn(async move { run(Commands::Call { caller: owner, op }, &config).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let ledger = Ledger::load_snapshot(&config.snapshot_path).unwrap();
        for to in &recipients {
            assert_eq!(ledger.balance_of(to).await, 10);
        }
        assert_eq!(ledger.balance_of(&owner).await, 1_000_000 - 160);
        assert!(!Path::new(&format!("{}.lock", config.snapshot_path)).exists());
    }

    #[tokio::test]
    async fn test_call_gives_up_while_snapshot_is_locked() {
        let dir = tempfile::tempdir().unwrap();
        let config = NodeConfig { lock_timeout_ms: 50, ..config_in(&dir) };
        let owner = Address::random();
        run(deploy_by(owner, None, false), &config).await.unwrap();
        let before = std::fs::read_to_string(&config.snapshot_path).unwrap();

        let held = SnapshotLock::acquire(&config.snapshot_path, Duration::ZERO).await.unwrap();
        let err = run(
            Commands::Call { caller: owner, op: Operation::Mint { to: owner, amount: 1 } },
            &config,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, NodeError::Ledger(LedgerError::SnapshotLocked(_))));
        assert_eq!(std::fs::read_to_string(&config.snapshot_path).unwrap(), before);
        drop(held);

        run(
            Commands::Call { caller: owner, op: Operation::Mint { to: owner, amount: 1 } },
            &config,
        )
        .await
        .unwrap();
    }
}
