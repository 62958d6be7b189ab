//! Transition command - change the status of a case

use std::path::Path;

use crate::domain::get_allowed_next_statuses;
use crate::errors::{DocketError, FailureKind, Result, TransitionError};
use crate::schemas::{Case, CaseOutcome, CaseStatus, TransitionRequest};
use crate::store::CaseStore;
use crate::workflow::{
    CaseWorkflowService, ChangeStatusResponse, PolicyAuthorization, SystemClock, TransitionRecorder,
};

use super::{require_actor, to_json, Workspace};

/// Arguments of `docket transition`
#[derive(Debug, Clone)]
pub struct TransitionArgs<'a> {
    pub id: &'a str,
    pub status: &'a str,
    pub expected_version: u64,
    pub outcome: Option<&'a str>,
    pub note: Option<&'a str>,
    pub json: bool,
}

fn build_request(args: &TransitionArgs<'_>, actor_id: String) -> Result<TransitionRequest> {
    let target = args
        .status
        .parse::<CaseStatus>()
        .map_err(DocketError::ConfigError)?;
    let mut request = TransitionRequest::new(target, actor_id, args.expected_version);
    if let Some(outcome) = args.outcome {
        request = request.with_outcome(outcome.parse::<CaseOutcome>().map_err(DocketError::ConfigError)?);
    }
    if let Some(note) = args.note {
        request = request.with_note(note);
    }
    Ok(request)
}

/// What the user can do about a rejected request, given the case as loaded
fn failure_hint(error: &TransitionError, case: &Case) -> Option<String> {
    let kind = error.kind();
    if kind.is_workflow_error() {
        let status = case.workflow.status;
        let targets = get_allowed_next_statuses(status);
        if targets.is_empty() {
            return Some(format!("{} is {} and cannot change status", case.id, status.human_label()));
        }
        let names: Vec<&str> = targets.iter().map(|s| s.as_str()).collect();
        let mut hint = format!("from {} the case may move to: {}", status, names.join(", "));
        if kind == FailureKind::MissingOutcome {
            hint.push_str(" (closing or dismissing needs --outcome)");
        }
        Some(hint)
    } else if kind == FailureKind::ConcurrentModification {
        Some(format!(
            "run `docket show {}` and retry with the current version",
            case.id
        ))
    } else {
        None
    }
}

/// Change the status of a case
pub async fn run(cwd: Option<&Path>, actor: Option<&str>, args: TransitionArgs<'_>) -> Result<()> {
    let actor_id = require_actor(actor)?;
    let request = build_request(&args, actor_id)?;
    let workspace = Workspace::open(cwd)?;

    let case = workspace.store.load_case(args.id)?;
    let authorization = PolicyAuthorization::from_config(&workspace.config).with_case(&case);
    let recorder = TransitionRecorder::from_config(&workspace.config);
    let service = CaseWorkflowService::new(workspace.store, authorization, recorder, SystemClock);

    let result = service.change_case_status(args.id, &request);

    if args.json {
        println!("{}", to_json(&ChangeStatusResponse::from(&result))?);
    } else if let Ok(changed) = &result {
        let outcome = changed
            .new_outcome
            .as_ref()
            .map(|o| format!(" with outcome {}", o))
            .unwrap_or_default();
        println!(
            "{} is now {}{} (version {}, record {})",
            changed.case_id,
            changed.new_status.human_label(),
            outcome,
            changed.new_version,
            changed.record_id
        );
    } else if let Some(hint) = result.as_ref().err().and_then(|e| failure_hint(e, &case)) {
        eprintln!("hint: {}", hint);
    }

    result.map(|_| ()).map_err(DocketError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::write_config;
    use crate::schemas::Config;
    use crate::store::FileCaseStore;
    use tempfile::TempDir;

    fn args<'a>(status: &'a str, expected_version: u64, outcome: Option<&'a str>) -> TransitionArgs<'a> {
        TransitionArgs {
            id: "CASE-1",
            status,
            expected_version,
            outcome,
            note: Some("per client instruction"),
            json: false,
        }
    }

    async fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        crate::cli::commands::init::run(Some(temp.path()), false).await.unwrap();
        let config = Config {
            admins: vec!["clerk".to_string()],
            ..Config::default()
        };
        write_config(temp.path(), &config).unwrap();
        crate::cli::commands::open::run(Some(temp.path()), "CASE-1", "Doe v. City", None, &["alice".to_string()])
            .await
            .unwrap();
        temp
    }

    fn kind_of(err: DocketError) -> FailureKind {
        match err {
            DocketError::Transition(e) => e.kind(),
            other => panic!("expected a transition error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_request() {
        let request = build_request(&args("closed", 2, Some("Settled")), "alice".to_string()).unwrap();
        assert_eq!(request.target_status, CaseStatus::Closed);
        assert_eq!(request.outcome, Some(CaseOutcome::Settled));
        assert_eq!(request.note.as_deref(), Some("per client instruction"));
        assert_eq!(request.expected_version, 2);

        assert!(build_request(&args("reopened", 0, None), "alice".to_string()).is_err());
    }

    #[test]
    fn test_failure_hint() {
        let case = Case::new("CASE-1".to_string(), "Doe v. City".to_string(), chrono::Utc::now());

        let missing = TransitionError::MissingOutcome { target: CaseStatus::Dismissed };
        let hint = failure_hint(&missing, &case).unwrap();
        assert!(hint.contains("in_progress, on_hold, dismissed"));
        assert!(hint.contains("--outcome"));

        let stale = TransitionError::ConcurrentModification {
            case_id: "CASE-1".to_string(),
            expected: 0,
            actual: 1,
        };
        assert!(failure_hint(&stale, &case).unwrap().contains("docket show CASE-1"));

        let forbidden = TransitionError::Forbidden {
            actor_id: "bob".to_string(),
            case_id: "CASE-1".to_string(),
        };
        assert_eq!(failure_hint(&forbidden, &case), None);

        let closed = case.with_workflow(
            crate::schemas::CaseWorkflowState {
                status: CaseStatus::Closed,
                outcome: Some(CaseOutcome::Settled),
                version: 1,
            },
            chrono::Utc::now(),
        );
        let invalid = TransitionError::InvalidTransition {
            from: CaseStatus::Closed,
            to: CaseStatus::Open,
        };
        assert!(failure_hint(&invalid, &closed).unwrap().contains("cannot change status"));
    }

    #[tokio::test]
    async fn test_assigned_attorney_moves_case_through_lifecycle() {
        let temp = setup().await;
        let cwd = Some(temp.path());

        run(cwd, Some("alice"), args("in_progress", 0, None)).await.unwrap();
        run(cwd, Some("clerk"), args("on_hold", 1, None)).await.unwrap();
        run(cwd, Some("alice"), args("closed", 2, Some("settled"))).await.unwrap();

        let store = FileCaseStore::new(temp.path());
        let case = store.load_case("CASE-1").unwrap();
        assert_eq!(case.workflow.status, CaseStatus::Closed);
        assert_eq!(case.workflow.outcome, Some(CaseOutcome::Settled));
        assert_eq!(case.workflow.version, 3);

        let history = store.list_transitions("CASE-1").unwrap();
        let actors: Vec<&str> = history.iter().map(|r| r.actor_id()).collect();
        assert_eq!(actors, vec!["alice", "clerk", "alice"]);
    }

    #[tokio::test]
    async fn test_unassigned_actor_is_forbidden() {
        let temp = setup().await;

        let err = run(Some(temp.path()), Some("bob"), args("in_progress", 0, None)).await.unwrap_err();
        assert_eq!(kind_of(err), FailureKind::Forbidden);
        assert!(FileCaseStore::new(temp.path()).list_transitions("CASE-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_version_is_concurrent_modification() {
        let temp = setup().await;
        let cwd = Some(temp.path());
        run(cwd, Some("alice"), args("in_progress", 0, None)).await.unwrap();

        let err = run(cwd, Some("alice"), args("on_hold", 0, None)).await.unwrap_err();
        assert_eq!(kind_of(err), FailureKind::ConcurrentModification);
    }

    #[tokio::test]
    async fn test_missing_actor() {
        let temp = setup().await;
        let err = run(Some(temp.path()), None, args("in_progress", 0, None)).await.unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
