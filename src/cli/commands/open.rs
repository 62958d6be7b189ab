//! Open command - create a new case

use std::path::Path;

use crate::errors::Result;
use crate::schemas::Case;
use crate::store::CaseStore;
use crate::workflow::{Clock, SystemClock};

use super::Workspace;

/// Open a new case at status open, version 0
pub async fn run(
    cwd: Option<&Path>,
    id: &str,
    title: &str,
    matter_type: Option<&str>,
    assign: &[String],
) -> Result<()> {
    let workspace = Workspace::open(cwd)?;

    let case = Case::new(id.to_string(), title.to_string(), SystemClock.now())
        .with_matter_type(matter_type.map(str::to_string))
        .with_assignees(assign.to_vec());
    workspace.store.create_case(&case)?;

    tracing::info!(case_id = id, root = %workspace.root.display(), "case opened");
    println!("Opened {} \"{}\" (status: {}, version: {})", case.id, case.title, case.workflow.status, case.workflow.version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CaseStatus;
    use crate::store::FileCaseStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_case() {
        let temp = TempDir::new().unwrap();
        crate::cli::commands::init::run(Some(temp.path()), false).await.unwrap();

        run(Some(temp.path()), "CASE-1", "Doe v. City", Some("litigation"), &["alice".to_string()])
            .await
            .unwrap();

        let case = FileCaseStore::new(temp.path()).load_case("CASE-1").unwrap();
        assert_eq!(case.workflow.status, CaseStatus::Open);
        assert_eq!(case.matter_type.as_deref(), Some("litigation"));
        assert!(case.is_assigned("alice"));
    }

    #[tokio::test]
    async fn test_open_rejects_bad_id() {
        let temp = TempDir::new().unwrap();
        crate::cli::commands::init::run(Some(temp.path()), false).await.unwrap();

        let err = run(Some(temp.path()), "../x", "Bad", None, &[]).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_CASE_ID");
    }
}
