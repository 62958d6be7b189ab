//! Show command - print one case

use std::path::Path;

use crate::errors::Result;
use crate::store::CaseStore;

use super::{to_json, Workspace};

/// Show details of a specific case
pub async fn run(cwd: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let workspace = Workspace::open(cwd)?;
    let case = workspace.store.load_case(id)?;

    if json {
        println!("{}", to_json(&case)?);
        return Ok(());
    }

    println!("{}: {}", case.id, case.title);
    if let Some(matter_type) = &case.matter_type {
        println!("  Matter type: {}", matter_type);
    }
    println!("  Status:      {}", case.workflow.status.human_label());
    if let Some(outcome) = &case.workflow.outcome {
        println!("  Outcome:     {}", outcome);
    }
    println!("  Version:     {}", case.workflow.version);
    if !case.assigned_to.is_empty() {
        println!("  Assigned to: {}", case.assigned_to.join(", "));
    }
    println!("  Opened:      {}", case.created_at.to_rfc3339());
    println!("  Updated:     {}", case.updated_at.to_rfc3339());
    Ok(())
}
