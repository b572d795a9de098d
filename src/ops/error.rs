//! Domain-specific errors for ledger operations

use thiserror::Error;

use crate::store::LedgerError;

#[derive(Error, Debug)]
pub enum OpError {
    /// pip could not be spawned at all. Nothing was recorded.
    #[error("Failed to run {program}: {source}")]
    ExecutionFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// pip ran and reported failure. Nothing was recorded.
    #[error("pip exited with {status}")]
    OperationFailed { status: std::process::ExitStatus },

    /// pip confirmed an effect but the ledger write failed: the change
    /// happened and is not durably recorded.
    #[error("packages changed but could not be recorded ({joined}): {source}", joined = .packages.join(","))]
    LedgerWriteFailed {
        packages: Vec<String>,
        #[source]
        source: LedgerError,
    },

    /// No transaction has the requested id.
    #[error("No transaction with ID {0} found")]
    RecordNotFound(i64),

    /// Upgrades do not store the prior pinned versions, so there is no
    /// faithful inverse to replay.
    #[error("transaction {0} is an upgrade and cannot be undone: prior versions were not recorded")]
    UpgradeNotInvertible(i64),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
