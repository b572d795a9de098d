//! Install command

use anyhow::{Context, Result, bail};

use crate::ops::context::OpContext;
use crate::ops::exec;
use crate::store::Action;

/// Install (or upgrade) the comma-separated package list.
pub fn install(ctx: &OpContext, pkgs: &str, upgrade: bool, venv: Option<&str>) -> Result<()> {
    let packages = crate::cmd::split_pkgs(pkgs);
    if packages.is_empty() {
        bail!("Package list required. Please add the -p option with a list of packages and retry.");
    }

    let action = if upgrade {
        Action::Upgrade
    } else {
        Action::Install
    };

    let outcome = exec::execute(ctx, action, &packages, venv)
        .with_context(|| format!("Failed to {action} {pkgs}"))?;
    crate::cmd::report(&outcome);
    Ok(())
}
