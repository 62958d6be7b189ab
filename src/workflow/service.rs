//! The `change_case_status` operation
//!
//! Wires the three workflow components together for one request:
//! load → authorize + decide → record + commit.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{FailureKind, TransitionError};
use crate::schemas::{CaseOutcome, CaseStatus, TransitionRequest};
use crate::store::CaseStore;

use super::authorizer::{CaseAuthorization, TransitionAuthorizer};
use super::recorder::{Clock, TransitionRecorder};

/// What a successful status change produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChanged {
    pub case_id: String,
    pub new_status: CaseStatus,
    pub new_outcome: Option<CaseOutcome>,
    pub new_version: u64,
    pub record_id: Uuid,
}

/// Success/failure shape handed to the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ChangeStatusResponse {
    Success {
        new_status: CaseStatus,
        new_outcome: Option<CaseOutcome>,
        new_version: u64,
        record_id: Uuid,
    },
    Failure {
        kind: FailureKind,
        message: String,
    },
}

impl From<&Result<StatusChanged, TransitionError>> for ChangeStatusResponse {
    fn from(result: &Result<StatusChanged, TransitionError>) -> Self {
        match result {
            Ok(changed) => ChangeStatusResponse::Success {
                new_status: changed.new_status,
                new_outcome: changed.new_outcome.clone(),
                new_version: changed.new_version,
                record_id: changed.record_id,
            },
            Err(e) => ChangeStatusResponse::Failure {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Entry point for status changes against one store.
pub struct CaseWorkflowService<S, A, C> {
    store: S,
    authorizer: TransitionAuthorizer<A>,
    recorder: TransitionRecorder,
    clock: C,
}

impl<S, A, C> CaseWorkflowService<S, A, C>
where
    S: CaseStore,
    A: CaseAuthorization,
    C: Clock,
{
    pub fn new(store: S, authorization: A, recorder: TransitionRecorder, clock: C) -> Self {
        CaseWorkflowService {
            store,
            authorizer: TransitionAuthorizer::new(authorization),
            recorder,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Move `case_id` to `request.target_status`.
    ///
    /// A caller whose `expected_version` does not match the stored case gets
    /// `ConcurrentModification` before the engine looks at the request, and
    /// the conditional commit covers the race between load and write.
    /// A missing case is reported as a persistence failure.
    pub fn change_case_status(
        &self,
        case_id: &str,
        request: &TransitionRequest,
    ) -> Result<StatusChanged, TransitionError> {
        let result = self.run(case_id, request);
        match &result {
            Ok(changed) => info!(
                case_id,
                actor_id = %request.actor_id,
                status = %changed.new_status,
                version = changed.new_version,
                record_id = %changed.record_id,
                "case status changed"
            ),
            Err(e) => warn!(
                case_id,
                actor_id = %request.actor_id,
                target = %request.target_status,
                kind = %e.kind(),
                "case status change rejected: {}",
                e
            ),
        }
        result
    }

    fn run(&self, case_id: &str, request: &TransitionRequest) -> Result<StatusChanged, TransitionError> {
        let case = self.store.load_case(case_id)?;
        let current = &case.workflow;

        let new_state = self.authorizer.attempt(case_id, current, request)?;

        let record = self.recorder.record(
            &self.store,
            case_id,
            current.status,
            request,
            &new_state,
            &self.clock,
        )?;

        Ok(StatusChanged {
            case_id: case_id.to_string(),
            new_status: new_state.status,
            new_outcome: new_state.outcome,
            new_version: new_state.version,
            record_id: record.record_id(),
        })
    }
}
