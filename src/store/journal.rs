//! Activity journal
//!
//! Side-channel log of confirmed effects, one line per affected package.
//! Write-only: nothing in pipmem ever reads it back.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::paths;

/// Append-only handle to the activity journal file.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Journal at the default location (`~/.pipmem/pipmem.log`).
    pub fn open() -> Self {
        Self::at(paths::log_path())
    }

    /// Journal at a specific path (for testing).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one `<timestamp> <verb> <package>` line.
    pub fn record(&self, verb: &str, package: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{now} {verb} {package}")
    }
}
