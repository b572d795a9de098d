//! Command layer: thin wrappers that run operations and report outcomes.

pub mod history;
pub mod install;
pub mod uninstall;

use crate::ops::exec::Outcome;

/// Split the CLI's comma-joined package string into individual tokens.
pub(crate) fn split_pkgs(pkgs: &str) -> Vec<String> {
    pkgs.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Recorded { id, packages } => {
            println!(
                "Recorded transaction {id}: {} package(s) affected",
                packages.len()
            );
        }
        Outcome::NoEffect => {
            println!("No packages were affected; nothing recorded.");
        }
    }
}
