//! History command - print the audit trail of a case

use std::path::Path;

use crate::errors::Result;
use crate::store::CaseStore;

use super::{to_json, Workspace};

/// Show the audit trail of a case, oldest first
pub async fn run(cwd: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let workspace = Workspace::open(cwd)?;
    let records = workspace.store.list_transitions(id)?;

    if json {
        println!("{}", to_json(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} has no recorded transitions", id);
        return Ok(());
    }
    for record in &records {
        print!(
            "v{:<4} {}  {} -> {}  by {}",
            record.resulting_version(),
            record.timestamp().to_rfc3339(),
            record.from_status(),
            record.to_status(),
            record.actor_id()
        );
        if let Some(outcome) = record.outcome() {
            print!("  outcome: {}", outcome);
        }
        println!();
        if let Some(note) = record.note() {
            for line in note.lines() {
                println!("        | {}", line);
            }
        }
    }
    Ok(())
}
