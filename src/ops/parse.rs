//! pip output parsing.
//!
//! pip's stdout is an unversioned, best-effort contract; every assumption
//! about its shape lives in this module. The grammar is a marker
//! substring plus positional token extraction, scanned line by line.
//! Unrecognized lines are ignored, never fatal.

use crate::store::Action;

const INSTALLED_MARKER: &str = "Successfully installed";
const UNINSTALLED_MARKER: &str = "Successfully uninstalled";

/// Extract the confirmed effect from captured pip output.
///
/// A failed exit yields an empty effect, as does success output with no
/// marker line (e.g. every requirement was already satisfied). Both mean
/// "record nothing" and neither is an error.
pub fn parse_effect(action: Action, stdout: &str, success: bool) -> Vec<String> {
    if !success {
        return Vec::new();
    }

    let mut effect = Vec::new();
    match action {
        // One marker line enumerates every installed package.
        Action::Install | Action::Upgrade => {
            for line in stdout.lines() {
                if let Some((_, rest)) = line.split_once(INSTALLED_MARKER) {
                    effect.extend(rest.split_whitespace().map(pin));
                }
            }
        }
        // pip prints one removal line per package.
        Action::Uninstall => {
            for line in stdout.lines() {
                if let Some((_, rest)) = line.split_once(UNINSTALLED_MARKER) {
                    if let Some(token) = rest.split_whitespace().next() {
                        effect.push(pin(token));
                    }
                }
            }
        }
    }
    effect
}

/// Normalize pip's `name-1.2` output form into the pinned `name==1.2`
/// form stored in the ledger and replayed by undo.
///
/// The split point is the rightmost hyphen followed by a digit, which
/// keeps hyphenated names like `typing-extensions-4.8.0` intact. Tokens
/// without a recognizable version suffix are returned bare.
fn pin(token: &str) -> String {
    for (idx, _) in token.match_indices('-').rev() {
        let suffix = &token[idx + 1..];
        if suffix.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return format!("{}=={}", &token[..idx], suffix);
        }
    }
    token.to_string()
}
