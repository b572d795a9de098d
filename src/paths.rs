//! Filesystem locations for the pipmem home, ledger, and journal.

use dirs::home_dir;
use std::path::PathBuf;

/// Returns the primary data directory, or None if the user's home cannot be resolved.
pub fn try_pipmem_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("PIPMEM_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".pipmem"))
}

/// Returns the canonical pipmem home directory (`~/.pipmem`).
///
/// # Panics
///
/// Panics if neither `PIPMEM_HOME` is set nor the user's home directory
/// can be resolved.
pub fn pipmem_home() -> PathBuf {
    try_pipmem_home().expect("Could not determine home directory. Set PIPMEM_HOME to override.")
}

/// `SQLite` ledger path: ~/.pipmem/pipmem.db
pub fn db_path() -> PathBuf {
    pipmem_home().join("pipmem.db")
}

/// Activity journal path: ~/.pipmem/pipmem.log
pub fn log_path() -> PathBuf {
    pipmem_home().join("pipmem.log")
}
