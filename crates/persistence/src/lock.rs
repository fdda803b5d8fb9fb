//! Store Lock
//!
//! Advisory file lock serializing access to the persisted ledger. A
//! mutating call is a whole load→verify→append→save cycle; two sessions
//! interleaving those cycles would silently drop the earlier append (the
//! later save wins). Writers therefore hold the exclusive mode for the full
//! cycle; readers take the shared mode, so reads run concurrently with each
//! other but never overlap a write.
//!
//! The lock lives on a dedicated lock file, never the data file: every save
//! replaces the data file's inode by rename, and a lock on a replaced inode
//! excludes nobody.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// RAII guard over an advisory `flock`. Released on drop, on every exit
/// path including errors.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    /// Block until the exclusive (writer) lock is held.
    pub fn exclusive(path: &Path) -> io::Result<Self> {
        Self::acquire(path, true)
    }

    /// Block until a shared (reader) lock is held.
    pub fn shared(path: &Path) -> io::Result<Self> {
        Self::acquire(path, false)
    }

    fn acquire(path: &Path, exclusive: bool) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)?;
        flock(&file, exclusive)?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // The OS also releases the lock when the descriptor closes; the
        // explicit unlock just makes the release point deterministic.
        #[cfg(unix)]
        {
            use std::os::unix::io::AsRawFd;
            // SAFETY: the fd is valid for the lifetime of `self.file`.
            unsafe {
                libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
            }
        }
    }
}

#[cfg(unix)]
fn flock(file: &File, exclusive: bool) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let operation = if exclusive {
        libc::LOCK_EX
    } else {
        libc::LOCK_SH
    };
    // SAFETY: flock is a standard POSIX call; the fd is a valid descriptor
    // owned by `file` for the duration of the call.
    let result = unsafe { libc::flock(file.as_raw_fd(), operation) };
    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn flock(_file: &File, _exclusive: bool) -> io::Result<()> {
    // Advisory locking is Unix-only; elsewhere the single-process access
    // model stands on its own.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exclusive_lock_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json.lock");

        {
            let _guard = StoreLock::exclusive(&path).unwrap();
        }
        // Released on drop; a second acquisition must not block.
        let _guard = StoreLock::exclusive(&path).unwrap();
    }

    #[test]
    fn test_shared_locks_coexist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json.lock");

        let _first = StoreLock::shared(&path).unwrap();
        let _second = StoreLock::shared(&path).unwrap();
    }

    #[test]
    fn test_exclusive_follows_shared_after_release() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json.lock");

        {
            let _readers = (
                StoreLock::shared(&path).unwrap(),
                StoreLock::shared(&path).unwrap(),
            );
        }
        let _writer = StoreLock::exclusive(&path).unwrap();
    }
}
