//! History command

use anyhow::{Context, Result};

use crate::ops::context::OpContext;
use crate::ops::undo as undo_engine;

/// Print a column-aligned summary of the most recent transactions.
pub fn list(ctx: &OpContext, limit: usize) -> Result<()> {
    let entries = ctx
        .ledger
        .list_recent(limit)
        .context("Failed to read the transaction ledger")?;

    if entries.is_empty() {
        println!("No transactions recorded yet.");
        return Ok(());
    }

    println!("Last {} transactions performed\n", entries.len());
    println!("{:<8} | {:<20} | {:<20}", "ID", "Timestamp", "Action");
    println!("{}", "-".repeat(48));
    for entry in entries {
        println!(
            "{:<8} | {:<20} | {:<20}",
            entry.id, entry.timestamp, entry.action
        );
    }
    println!();

    Ok(())
}

/// Print the full detail of one transaction.
pub fn info(ctx: &OpContext, id: i64) -> Result<()> {
    let record = ctx
        .ledger
        .get_by_id(id)
        .context("Failed to read the transaction ledger")?;

    let Some(record) = record else {
        println!("No transaction with ID {id} found");
        return Ok(());
    };

    println!("ID: {}", record.id);
    println!("Timestamp: {}", record.timestamp);
    println!("Action: {}", record.action);
    println!("venv: {}", record.venv.as_deref().unwrap_or("None"));
    println!("Packages:");
    for pkg in &record.packages {
        println!("\t{pkg}");
    }

    Ok(())
}

/// Replay the inverse of a recorded transaction.
pub fn undo(ctx: &OpContext, id: i64) -> Result<()> {
    let outcome = undo_engine::undo(ctx, id)
        .with_context(|| format!("Failed to undo transaction {id}"))?;
    crate::cmd::report(&outcome);
    Ok(())
}
