//! Persistent state: the transaction ledger and the activity journal.

pub mod db;
pub mod journal;

pub use db::{Action, HistoryEntry, Ledger, LedgerError, Transaction};
pub use journal::Journal;
