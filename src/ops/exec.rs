//! Operation executor: run pip and record the confirmed effect.

use std::process::Command;

use crate::ops::context::OpContext;
use crate::ops::error::OpError;
use crate::ops::{parse, venv};
use crate::store::Action;

/// What a single pip invocation amounted to.
#[derive(Debug)]
pub enum Outcome {
    /// pip confirmed an effect and the ledger recorded it.
    Recorded { id: i64, packages: Vec<String> },
    /// pip succeeded but affected nothing; nothing was recorded.
    NoEffect,
}

/// Run pip for `action` over `packages`, echo its output, and append the
/// confirmed effect to the ledger.
///
/// The recorded package set is what pip reports as changed, not the
/// requested list: asking for five packages where only three actually
/// change records exactly those three. A ledger failure after a confirmed
/// effect surfaces as [`OpError::LedgerWriteFailed`]; the external change
/// has already happened at that point and is not rolled back.
pub fn execute(
    ctx: &OpContext,
    action: Action,
    packages: &[String],
    venv_root: Option<&str>,
) -> Result<Outcome, OpError> {
    let program = venv::pip_executable(venv_root);

    let mut cmd = Command::new(&program);
    match action {
        Action::Install => cmd.arg("install"),
        Action::Upgrade => cmd.args(["install", "-U"]),
        Action::Uninstall => cmd.args(["uninstall", "-y"]),
    };
    cmd.args(packages);

    tracing::debug!(program = %program.display(), %action, ?packages, "invoking pip");

    let output = cmd.output().map_err(|source| OpError::ExecutionFailed {
        program: program.display().to_string(),
        source,
    })?;

    // Capturing hides pip's own diagnostics, so echo both streams verbatim.
    let stdout = String::from_utf8_lossy(&output.stdout);
    print!("{stdout}");
    eprint!("{}", String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(OpError::OperationFailed {
            status: output.status,
        });
    }

    let effect = parse::parse_effect(action, &stdout, true);
    if effect.is_empty() {
        return Ok(Outcome::NoEffect);
    }

    let id = ctx
        .ledger
        .append(action, &effect, venv_root)
        .map_err(|source| OpError::LedgerWriteFailed {
            packages: effect.clone(),
            source,
        })?;

    // Journal lines only after the record is durable.
    for package in &effect {
        if let Err(err) = ctx.journal.record(action.verb(), package) {
            tracing::warn!(%err, %package, "failed to append journal line");
        }
    }

    Ok(Outcome::Recorded { id, packages: effect })
}
