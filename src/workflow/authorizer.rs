//! Authorization gate in front of the lifecycle engine

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::domain::CaseLifecycleEngine;
use crate::errors::TransitionError;
use crate::schemas::{Case, CaseWorkflowState, Config, TransitionRequest};

/// Answers "may this actor change this case?"
///
/// Implemented by whatever owns roles and assignments. Closures
/// `Fn(&str, &str) -> bool` taking `(actor_id, case_id)` work too.
pub trait CaseAuthorization {
    fn can_mutate_case(&self, actor_id: &str, case_id: &str) -> bool;
}

impl<F> CaseAuthorization for F
where
    F: Fn(&str, &str) -> bool,
{
    fn can_mutate_case(&self, actor_id: &str, case_id: &str) -> bool {
        self(actor_id, case_id)
    }
}

/// Grants every request
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CaseAuthorization for AllowAll {
    fn can_mutate_case(&self, _actor_id: &str, _case_id: &str) -> bool {
        true
    }
}

/// Administrators may change any case; everyone else only cases they are assigned to.
#[derive(Debug, Clone, Default)]
pub struct PolicyAuthorization {
    admins: BTreeSet<String>,
    assignments: HashMap<String, BTreeSet<String>>,
}

impl PolicyAuthorization {
    pub fn new(admins: impl IntoIterator<Item = String>) -> Self {
        PolicyAuthorization {
            admins: admins.into_iter().collect(),
            assignments: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.admins.iter().cloned())
    }

    /// Add the roster of `case` to the policy
    pub fn with_case(mut self, case: &Case) -> Self {
        self.assign(&case.id, case.assigned_to.iter().cloned());
        self
    }

    pub fn assign(&mut self, case_id: &str, actors: impl IntoIterator<Item = String>) {
        self.assignments
            .entry(case_id.to_string())
            .or_default()
            .extend(actors);
    }
}

impl CaseAuthorization for PolicyAuthorization {
    fn can_mutate_case(&self, actor_id: &str, case_id: &str) -> bool {
        if actor_id.is_empty() {
            return false;
        }
        self.admins.contains(actor_id)
            || self
                .assignments
                .get(case_id)
                .is_some_and(|actors| actors.contains(actor_id))
    }
}

/// Runs the capability check, then the version check, then the engine.
///
/// Permission failures come back as `Forbidden` and are never mixed up with
/// workflow failures. A request made against an older version than `state`
/// is `ConcurrentModification`, whatever the engine would have said about it.
/// The engine is consulted only for a permitted, current request.
#[derive(Debug, Clone, Default)]
pub struct TransitionAuthorizer<A> {
    authorization: A,
    engine: CaseLifecycleEngine,
}

impl<A: CaseAuthorization> TransitionAuthorizer<A> {
    pub fn new(authorization: A) -> Self {
        TransitionAuthorizer {
            authorization,
            engine: CaseLifecycleEngine::new(),
        }
    }

    /// Check that `request.actor_id` may change `case_id` and that the request
    /// was made against `state.version`, then apply it to `state`.
    pub fn attempt(
        &self,
        case_id: &str,
        state: &CaseWorkflowState,
        request: &TransitionRequest,
    ) -> Result<CaseWorkflowState, TransitionError> {
        if !self.authorization.can_mutate_case(&request.actor_id, case_id) {
            debug!(case_id, actor_id = %request.actor_id, "actor refused");
            return Err(TransitionError::Forbidden {
                actor_id: request.actor_id.clone(),
                case_id: case_id.to_string(),
            });
        }

        if state.version != request.expected_version {
            debug!(
                case_id,
                expected = request.expected_version,
                actual = state.version,
                "stale request"
            );
            return Err(TransitionError::ConcurrentModification {
                case_id: case_id.to_string(),
                expected: request.expected_version,
                actual: state.version,
            });
        }

        self.engine.transition(state, request)
    }
}
