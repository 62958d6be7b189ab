//! Next command - list the statuses a case may move to

use std::path::Path;

use crate::domain::{is_terminal_status, CaseLifecycleEngine};
use crate::errors::Result;
use crate::store::CaseStore;

use super::Workspace;

/// Show allowed next statuses
pub async fn run(cwd: Option<&Path>, id: &str) -> Result<()> {
    let workspace = Workspace::open(cwd)?;
    let case = workspace.store.load_case(id)?;
    let status = case.workflow.status;

    if is_terminal_status(status) {
        println!("{} is {} (terminal); no further transitions", case.id, status.human_label());
        return Ok(());
    }

    println!("{} is {} at version {}; may move to:", case.id, status.human_label(), case.workflow.version);
    for target in CaseLifecycleEngine::new().allowed_targets(status) {
        let hint = if is_terminal_status(*target) { "  (requires --outcome)" } else { "" };
        println!("  {}{}", target, hint);
    }
    Ok(())
}
