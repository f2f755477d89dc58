use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use token_common::{LedgerError, Result};

use crate::core::ledger::state::LedgerState;

const LOCK_RETRY: Duration = Duration::from_millis(20);

impl LedgerState {
    /// Writes the state as pretty JSON.
    ///
    /// The JSON goes to a temporary file next to `path`, is synced, then
    /// renamed over `path`. Readers see the old snapshot or the new one,
    /// never a partial write.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;

        tracing::debug!("💾 Snapshot written to {}", path.display());
        Ok(())
    }

    /// Reads a snapshot and checks the supply invariant before accepting it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let state: LedgerState = serde_json::from_str(&data)?;
        state.verify_supply()?;
        tracing::debug!(
            "📂 Snapshot loaded from {} ({} accounts)",
            path.as_ref().display(),
            state.account_count()
        );
        Ok(state)
    }
}

/// Exclusive claim on a snapshot file across processes.
///
/// Held as a `<snapshot>.lock` file created with `create_new`, so only one
/// holder exists at a time. Dropping the guard removes the file.
#[derive(Debug)]
pub struct SnapshotLock {
    path: PathBuf,
}

impl SnapshotLock {
    /// Waits up to `timeout` for the lock on `snapshot`.
    pub async fn acquire<P: AsRef<Path>>(snapshot: P, timeout: Duration) -> Result<Self> {
        let path = Self::lock_path(snapshot.as_ref());
        let deadline = Instant::now() + timeout;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    tracing::debug!("🔒 Acquired {}", path.display());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if Instant::now() >= deadline {
                        return Err(LedgerError::SnapshotLocked(path.display().to_string()));
                    }
                    tokio::time::sleep(LOCK_RETRY).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn lock_path(snapshot: &Path) -> PathBuf {
        let mut name = snapshot.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("⚠️ Could not release {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_common::Address;

    #[test]
    fn test_snapshot_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let owner = Address::random();
        let other = Address::random();

        let mut state = LedgerState::new(owner, 1_000);
        state.approve(&owner, other, 10).unwrap();
        state.edit_whitelist(&owner, other).unwrap();
        state.buy(&other, 5).unwrap();
        state.save_to_file(&path).unwrap();

        let loaded = LedgerState::load_from_file(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_tampered_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let owner = Address::random();
        LedgerState::new(owner, 1_000).save_to_file(&path).unwrap();

        let data = fs::read_to_string(&path).unwrap();
        fs::write(&path, data.replace("\"total_supply\": 1000", "\"total_supply\": 5000")).unwrap();

        assert!(matches!(
            LedgerState::load_from_file(&path),
            Err(LedgerError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let owner = Address::random();

        let mut state = LedgerState::new(owner, 1_000);
        for _ in 0..3 {
            state.mint(&owner, Address::random(), 10).unwrap();
            state.save_to_file(&path).unwrap();
        }
        // A shorter snapshot must not leave a tail of the longer one behind.
        let small = LedgerState::new(owner, 1);
        small.save_to_file(&path).unwrap();

        assert_eq!(LedgerState::load_from_file(&path).unwrap(), small);
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("ledger.json")]);
    }

    #[tokio::test]
    async fn test_lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let lock = SnapshotLock::acquire(&path, Duration::ZERO).await.unwrap();
        assert!(dir.path().join("ledger.json.lock").exists());

        assert!(matches!(
            SnapshotLock::acquire(&path, Duration::from_millis(60)).await,
            Err(LedgerError::SnapshotLocked(_))
        ));

        drop(lock);
        assert!(!dir.path().join("ledger.json.lock").exists());
        SnapshotLock::acquire(&path, Duration::ZERO).await.unwrap();
    }

    #[tokio::test]
    async fn test_waiter_gets_lock_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let lock = SnapshotLock::acquire(&path, Duration::ZERO).await.unwrap();
        let waiter = tokio::spawn({
            let path = path.clone();
            async move { SnapshotLock::acquire(&path, Duration::from_secs(5)).await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(lock);

        assert!(waiter.await.unwrap().is_ok());
    }
}
