//! pipmem - a transaction ledger for pip
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! Wraps pip install/uninstall/upgrade invocations, records every
//! confirmed effect in an append-only SQLite ledger, and can replay the
//! inverse of a past transaction.
//!
//! # Architecture
//!
//! - **Ledger**: `transactions` table in SQLite; records are appended,
//!   never mutated. Undo writes a new record instead of editing history.
//! - **Effect, not request**: what gets recorded is the package set pip
//!   confirms in its output, which may be smaller than what was asked for.
//! - **Context object**: [`OpContext`] owns the ledger and the activity
//!   journal and is threaded through the executor and undo engine.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.pipmem/
//! ├── pipmem.db    # SQLite transaction ledger
//! └── pipmem.log   # Activity journal (one line per affected package)
//! ```

pub mod cmd;
pub mod ops;
pub mod paths;
pub mod store;

pub use crate::ops::context::OpContext;
pub use crate::ops::error::OpError;
pub use crate::ops::exec::Outcome;
pub use crate::store::{Action, Ledger, LedgerError, Transaction};

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pipmem")]
#[command(
    author,
    version,
    about = "Keep track of actions performed by the pip package manager"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install packages and record the confirmed effect
    Install {
        /// Comma-separated package list, e.g. requests,urllib3==2.0.7
        #[arg(short, long)]
        pkgs: String,
        /// Upgrade the packages to the latest available version
        #[arg(short = 'U', long)]
        upgrade: bool,
        /// Virtualenv to operate on instead of the system interpreter
        #[arg(long, env = "VIRTUAL_ENV")]
        venv: Option<String>,
    },
    /// Uninstall packages and record the confirmed effect
    Uninstall {
        /// Comma-separated package list
        #[arg(short, long)]
        pkgs: String,
        /// Virtualenv to operate on instead of the system interpreter
        #[arg(long, env = "VIRTUAL_ENV")]
        venv: Option<String>,
    },
    /// Show, inspect, or undo recorded transactions
    History {
        /// Show details for the transaction with this ID
        #[arg(short, long, value_name = "ID")]
        info: Option<i64>,
        /// Replay the inverse of the transaction with this ID
        #[arg(long, value_name = "ID", conflicts_with = "info")]
        undo: Option<i64>,
        /// Number of transactions to list
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}
