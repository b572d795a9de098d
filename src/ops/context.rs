//! Shared operation context.
//!
//! Groups the ledger and the activity journal so the executor and undo
//! engine receive one explicitly constructed handle instead of reaching
//! for globals. Built once per process invocation in `main`.

use std::path::Path;

use crate::store::{Journal, Ledger};

/// State shared by the operation executor and the undo engine.
#[derive(Debug, Clone)]
pub struct OpContext {
    pub ledger: Ledger,
    pub journal: Journal,
}

impl OpContext {
    /// Context rooted at the default pipmem home.
    pub fn new() -> Self {
        Self {
            ledger: Ledger::open(),
            journal: Journal::open(),
        }
    }

    /// Context rooted at a specific directory (for testing).
    pub fn rooted_at(home: &Path) -> Self {
        Self {
            ledger: Ledger::at(home.join("pipmem.db")),
            journal: Journal::at(home.join("pipmem.log")),
        }
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::new()
    }
}
