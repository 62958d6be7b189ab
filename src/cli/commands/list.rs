//! List command - list cases with optional status filter

use std::path::Path;

use crate::errors::{DocketError, Result};
use crate::schemas::{Case, CaseStatus};
use crate::store::CaseStore;

use super::{to_json, Workspace};

fn filter_cases(cases: Vec<Case>, status: Option<CaseStatus>) -> Vec<Case> {
    match status {
        Some(status) => cases.into_iter().filter(|c| c.workflow.status == status).collect(),
        None => cases,
    }
}

/// List cases
pub async fn run(cwd: Option<&Path>, json: bool, status: Option<&str>) -> Result<()> {
    let status = status
        .map(|s| s.parse::<CaseStatus>().map_err(DocketError::ConfigError))
        .transpose()?;
    let workspace = Workspace::open(cwd)?;
    let cases = filter_cases(workspace.store.list_cases()?, status);

    if json {
        println!("{}", to_json(&cases)?);
        return Ok(());
    }

    if cases.is_empty() {
        println!("No cases");
        return Ok(());
    }
    for case in &cases {
        let outcome = case
            .workflow
            .outcome
            .as_ref()
            .map(|o| format!(" ({})", o))
            .unwrap_or_default();
        println!(
            "{:<20} {:<12} v{:<4} {}{}",
            case.id,
            case.workflow.status.human_label(),
            case.workflow.version,
            case.title,
            outcome
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_filter_cases() {
        let open = Case::new("A".to_string(), "a".to_string(), Utc::now());
        let mut held = Case::new("B".to_string(), "b".to_string(), Utc::now());
        held.workflow.status = CaseStatus::OnHold;

        let filtered = filter_cases(vec![open.clone(), held], Some(CaseStatus::Open));
        assert_eq!(filtered, vec![open]);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_status() {
        let err = run(None, false, Some("archived")).await.unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
