//! Undo engine: replay the inverse of a recorded transaction.

use crate::ops::context::OpContext;
use crate::ops::error::OpError;
use crate::ops::exec::{self, Outcome};
use crate::store::Action;

/// Look up a transaction and perform its inverse in the same environment.
///
/// The original record is never touched. A successful inverse is appended
/// as its own independent record, so undoing an undo simply yields a
/// third record with the original action and package set.
pub fn undo(ctx: &OpContext, id: i64) -> Result<Outcome, OpError> {
    let record = ctx
        .ledger
        .get_by_id(id)?
        .ok_or(OpError::RecordNotFound(id))?;

    let inverse = match record.action {
        Action::Install => Action::Uninstall,
        Action::Uninstall => Action::Install,
        // The prior pinned versions were never captured, so an upgrade
        // has no faithful inverse.
        Action::Upgrade => return Err(OpError::UpgradeNotInvertible(id)),
    };

    // The stored packages are already in pinned form; replay them as an
    // exact-pin request against the stored environment.
    exec::execute(ctx, inverse, &record.packages, record.venv.as_deref())
}
