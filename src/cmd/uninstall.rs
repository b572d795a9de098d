//! Uninstall command

use anyhow::{Context, Result, bail};

use crate::ops::context::OpContext;
use crate::ops::exec;
use crate::store::Action;

/// Uninstall the comma-separated package list.
pub fn uninstall(ctx: &OpContext, pkgs: &str, venv: Option<&str>) -> Result<()> {
    let packages = crate::cmd::split_pkgs(pkgs);
    if packages.is_empty() {
        bail!("Package list required. Please add the -p option with a list of packages and retry.");
    }

    let outcome = exec::execute(ctx, Action::Uninstall, &packages, venv)
        .with_context(|| format!("Failed to uninstall {pkgs}"))?;
    crate::cmd::report(&outcome);
    Ok(())
}
