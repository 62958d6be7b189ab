//! Validation rules for status transitions and persisted state

use crate::errors::TransitionError;
use crate::schemas::{CaseOutcome, CaseStatus, CaseWorkflowState};

use super::states::{is_allowed_transition, is_terminal_status};

/// Validate moving a case from `current` to `target` with the given outcome.
///
/// Checks run in a fixed order so every request has exactly one answer:
/// terminal source, self-transition, table edge, then outcome coupling.
pub fn validate_transition(
    current: CaseStatus,
    target: CaseStatus,
    outcome: Option<&CaseOutcome>,
) -> Result<(), TransitionError> {
    if is_terminal_status(current) {
        return Err(TransitionError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    if current == target {
        return Err(TransitionError::SelfTransition { status: current });
    }

    if !is_allowed_transition(current, target) {
        return Err(TransitionError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    validate_outcome(target, outcome)
}

/// A terminal target needs an outcome; a non-terminal target must not carry one.
///
/// A blank outcome code counts as no outcome.
pub fn validate_outcome(
    target: CaseStatus,
    outcome: Option<&CaseOutcome>,
) -> Result<(), TransitionError> {
    let outcome = outcome.filter(|o| !o.is_blank());
    match (is_terminal_status(target), outcome) {
        (true, None) => Err(TransitionError::MissingOutcome { target }),
        (false, Some(outcome)) => Err(TransitionError::OutcomeNotApplicable {
            target,
            outcome: outcome.clone(),
        }),
        _ => Ok(()),
    }
}

/// Check that a stored state is one the engine could have produced.
///
/// An outcome on a non-terminal case, or a terminal case with no outcome,
/// means the record was edited outside the engine.
pub fn check_invariants(state: &CaseWorkflowState) -> Result<(), String> {
    match (is_terminal_status(state.status), &state.outcome) {
        (false, Some(outcome)) => Err(format!(
            "outcome '{}' recorded on non-terminal status {}",
            outcome, state.status
        )),
        (true, None) => Err(format!("terminal status {} has no outcome", state.status)),
        _ => Ok(()),
    }
}
