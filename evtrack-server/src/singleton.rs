//! Keeps a second evtrack-server from serving the same storage file.
//!
//! The lock only excludes other servers. The CLI writes the file without
//! it, which is why the server reloads the store on every request.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Holds the lock until dropped
pub struct ServerLock {
    _file: File,
}

/// `<storage file>.lock`, next to the file it guards
fn lock_path(storage_path: &Path) -> PathBuf {
    let mut name = storage_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Lock `storage_path` for this server, failing if another server holds it
pub fn acquire_lock(storage_path: &Path) -> Result<ServerLock> {
    let path = lock_path(storage_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(&path).context("Failed to create lock file")?;
    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another evtrack-server is already serving {}.\n\
            If you believe this is an error, remove: {}",
            storage_path.display(),
            path.display()
        )
    })?;

    tracing::debug!(lock = %path.display(), "acquired server lock");
    Ok(ServerLock { _file: file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_server_on_same_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("data").join("events_v1.json");

        let lock = acquire_lock(&storage).unwrap();
        assert!(dir.path().join("data").join("events_v1.json.lock").exists());
        assert!(acquire_lock(&storage).is_err());

        let other = dir.path().join("data").join("work.json");
        assert!(acquire_lock(&other).is_ok());

        drop(lock);
        assert!(acquire_lock(&storage).is_ok());
    }
}
