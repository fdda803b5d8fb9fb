use std::path::{Path, PathBuf};

/// File locations for one registry instance. Paths are supplied by the
/// hosting layer; nothing here is read from the environment.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// The tamper-evident ledger file.
    pub ledger_path: PathBuf,
    /// The ephemeral transfer-request queue.
    pub requests_path: PathBuf,
}

impl RegistryConfig {
    /// Conventional file names inside a single data directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            ledger_path: dir.join("land_records.json"),
            requests_path: dir.join("transfer_requests.json"),
        }
    }

    /// Lock file guarding both stores. Kept off the data files themselves:
    /// saves replace those inodes by rename, and a lock on a replaced
    /// inode excludes nobody.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.ledger_path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }
}
