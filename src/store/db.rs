//! SQLite transaction ledger
//!
//! Append-only record of confirmed pip effects. Every call opens a fresh
//! connection and drops it before returning, which bounds handle lifetime
//! to a single call; any call can therefore independently fail if the
//! store is unavailable.

use std::fmt;
use std::path::PathBuf;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::paths;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Ledger unavailable at {}: {message}", .path.display())]
    Unavailable { path: PathBuf, message: String },
}

/// A recorded pip action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
    Upgrade,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Uninstall => "uninstall",
            Action::Upgrade => "upgrade",
        }
    }

    /// Past-tense verb used for journal lines.
    pub fn verb(self) -> &'static str {
        match self {
            Action::Install => "Installed",
            Action::Uninstall => "Uninstalled",
            Action::Upgrade => "Upgraded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "install" => Some(Action::Install),
            "uninstall" => Some(Action::Uninstall),
            "upgrade" => Some(Action::Upgrade),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl ToSql for Action {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Action {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Action::parse(value.as_str()?).ok_or(FromSqlError::InvalidType)
    }
}

/// One persisted ledger record.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub timestamp: String,
    pub action: Action,
    pub venv: Option<String>,
    pub packages: Vec<String>,
}

/// Summary row returned by [`Ledger::list_recent`].
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: i64,
    pub timestamp: String,
    pub action: Action,
}

/// Handle to the ledger file. Holds no open connection.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Ledger at the default location (`~/.pipmem/pipmem.db`).
    pub fn open() -> Self {
        Self::at(paths::db_path())
    }

    /// Ledger at a specific path (for testing).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> Result<Connection, LedgerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LedgerError::Unavailable {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }
        Connection::open(&self.path).map_err(|e| LedgerError::Unavailable {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Create the transactions table if it does not exist. Idempotent.
    pub fn ensure_schema(&self) -> Result<(), LedgerError> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                 id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                 timestamp TEXT NOT NULL,
                 action TEXT NOT NULL,
                 venv TEXT NULL,
                 pkgs TEXT NOT NULL)",
            [],
        )?;
        Ok(())
    }

    /// Run one call against a fresh connection. On failure, create the
    /// schema once and retry the single failed call before giving up.
    fn call<T>(&self, f: impl Fn(&Connection) -> rusqlite::Result<T>) -> Result<T, LedgerError> {
        let first = self
            .connect()
            .and_then(|conn| f(&conn).map_err(LedgerError::from));
        match first {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::debug!(error = %err, "ledger call failed, attempting schema creation");
                self.ensure_schema()?;
                let conn = self.connect()?;
                f(&conn).map_err(LedgerError::from)
            }
        }
    }

    /// Append a confirmed effect and return the assigned id.
    ///
    /// The timestamp is stamped here, at insert time, and is immutable
    /// thereafter. `packages` must be non-empty: an operation that
    /// affected nothing is never recorded.
    pub fn append(
        &self,
        action: Action,
        packages: &[String],
        venv: Option<&str>,
    ) -> Result<i64, LedgerError> {
        debug_assert!(!packages.is_empty(), "empty effects are never recorded");
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let pkgs = packages.join(",");
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO transactions (timestamp, action, venv, pkgs)
                 VALUES (?1, ?2, ?3, ?4)",
                params![now, action, venv, pkgs],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Most-recent-first summary of the last `limit` transactions.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, LedgerError> {
        self.call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, action FROM transactions
                 ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], |row| {
                Ok(HistoryEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    action: row.get(2)?,
                })
            })?;
            rows.collect()
        })
    }

    /// Point lookup by id. A missing id is `None`, not an error.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Transaction>, LedgerError> {
        self.call(|conn| {
            conn.query_row(
                "SELECT id, timestamp, action, venv, pkgs FROM transactions WHERE id = ?1",
                [id],
                |row| {
                    let pkgs: String = row.get(4)?;
                    Ok(Transaction {
                        id: row.get(0)?,
                        timestamp: row.get(1)?,
                        action: row.get(2)?,
                        venv: row.get(3)?,
                        packages: pkgs.split(',').map(str::to_string).collect(),
                    })
                },
            )
            .optional()
        })
    }
}
