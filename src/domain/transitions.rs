//! Status transition logic
//!
//! Pure functions for applying a transition request to a workflow state.

use tracing::debug;

use crate::errors::TransitionError;
use crate::schemas::{CaseStatus, CaseWorkflowState, TransitionRequest};

use super::states::get_allowed_next_statuses;
use super::validation::validate_transition;

/// Decides whether a transition is legal and computes the next state.
///
/// Stateless: every call receives the full current state. The engine never
/// reads a clock and never touches storage, so the same `(state, request)`
/// always yields the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseLifecycleEngine;

impl CaseLifecycleEngine {
    pub fn new() -> Self {
        CaseLifecycleEngine
    }

    /// Apply `request` to `state`.
    ///
    /// The input is never mutated. On success the returned state carries the
    /// target status, the request outcome (terminal targets only) and a
    /// version one higher than the input.
    pub fn transition(
        &self,
        state: &CaseWorkflowState,
        request: &TransitionRequest,
    ) -> Result<CaseWorkflowState, TransitionError> {
        apply_transition(state, request)
    }

    /// Statuses reachable from `status` in one step
    pub fn allowed_targets(&self, status: CaseStatus) -> &'static [CaseStatus] {
        get_allowed_next_statuses(status)
    }
}

/// Pure function behind [`CaseLifecycleEngine::transition`].
pub fn apply_transition(
    state: &CaseWorkflowState,
    request: &TransitionRequest,
) -> Result<CaseWorkflowState, TransitionError> {
    let outcome = request.outcome.clone().filter(|o| !o.is_blank());
    validate_transition(state.status, request.target_status, outcome.as_ref())?;

    debug!(
        from = %state.status,
        to = %request.target_status,
        version = state.version,
        "transition accepted by engine"
    );

    Ok(CaseWorkflowState {
        status: request.target_status,
        // Validation guarantees this is None for non-terminal targets
        outcome,
        version: state.version + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CaseOutcome;

    fn state(status: CaseStatus, version: u64) -> CaseWorkflowState {
        let outcome = match status {
            CaseStatus::Closed | CaseStatus::Dismissed => Some(CaseOutcome::Resolved),
            _ => None,
        };
        CaseWorkflowState {
            status,
            outcome,
            version,
        }
    }

    #[test]
    fn test_open_to_in_progress() {
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::InProgress, "alice", 0);

        let next = engine.transition(&state(CaseStatus::Open, 0), &request).unwrap();
        assert_eq!(
            next,
            CaseWorkflowState {
                status: CaseStatus::InProgress,
                outcome: None,
                version: 1
            }
        );
    }

    #[test]
    fn test_close_with_outcome() {
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::Closed, "alice", 2)
            .with_outcome(CaseOutcome::JudgmentForPlaintiff);

        let next = engine.transition(&state(CaseStatus::OnHold, 2), &request).unwrap();
        assert_eq!(next.status, CaseStatus::Closed);
        assert_eq!(next.outcome, Some(CaseOutcome::JudgmentForPlaintiff));
        assert_eq!(next.version, 3);
    }

    #[test]
    fn test_close_without_outcome_fails() {
        let engine = CaseLifecycleEngine::new();
        let current = state(CaseStatus::InProgress, 3);
        let request = TransitionRequest::new(CaseStatus::Closed, "alice", 3);

        let err = engine.transition(&current, &request).unwrap_err();
        assert_eq!(err, TransitionError::MissingOutcome { target: CaseStatus::Closed });
        assert_eq!(current.version, 3);
    }

    #[test]
    fn test_from_closed_fails() {
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::Dismissed, "alice", 5)
            .with_outcome(CaseOutcome::Withdrawn);

        let err = engine.transition(&state(CaseStatus::Closed, 5), &request).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn test_blank_outcome_counts_as_missing() {
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::Dismissed, "alice", 0)
            .with_outcome(CaseOutcome::Other("  ".to_string()));

        let err = engine.transition(&state(CaseStatus::Open, 0), &request).unwrap_err();
        assert_eq!(err, TransitionError::MissingOutcome { target: CaseStatus::Dismissed });

        let on_hold = TransitionRequest::new(CaseStatus::OnHold, "alice", 0)
            .with_outcome(CaseOutcome::Other(String::new()));
        let next = engine.transition(&state(CaseStatus::Open, 0), &on_hold).unwrap();
        assert_eq!(next.outcome, None);
    }

    #[test]
    fn test_self_transition_fails() {
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::Open, "alice", 0);

        let err = engine.transition(&state(CaseStatus::Open, 0), &request).unwrap_err();
        assert_eq!(err, TransitionError::SelfTransition { status: CaseStatus::Open });
    }

    #[test]
    fn test_outcome_on_active_case_fails() {
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::OnHold, "alice", 1)
            .with_outcome(CaseOutcome::Settled);

        let err = engine.transition(&state(CaseStatus::InProgress, 1), &request).unwrap_err();
        assert!(matches!(err, TransitionError::OutcomeNotApplicable { .. }));
    }

    #[test]
    fn test_transition_does_not_mutate_input() {
        let engine = CaseLifecycleEngine::new();
        let current = state(CaseStatus::Open, 0);
        let original = current.clone();
        let request = TransitionRequest::new(CaseStatus::OnHold, "alice", 0);

        let _ = engine.transition(&current, &request);
        assert_eq!(current, original);
    }

    #[test]
    fn test_expected_version_is_not_the_engines_concern() {
        // Version arbitration happens at commit time, not in the engine
        let engine = CaseLifecycleEngine::new();
        let request = TransitionRequest::new(CaseStatus::OnHold, "alice", 99);

        let next = engine.transition(&state(CaseStatus::Open, 0), &request).unwrap();
        assert_eq!(next.version, 1);
    }

    #[test]
    fn test_allowed_targets() {
        let engine = CaseLifecycleEngine::new();
        assert!(engine.allowed_targets(CaseStatus::Dismissed).is_empty());
        assert!(engine.allowed_targets(CaseStatus::Open).contains(&CaseStatus::InProgress));
    }
}
