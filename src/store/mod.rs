//! Case persistence
//!
//! The workflow core only needs two things from storage: load the current
//! case, and atomically commit a new state together with its audit record if
//! (and only if) the stored version still matches what the caller saw.

mod file;
mod memory;

use serde::{Deserialize, Serialize};

use crate::domain::check_invariants;
use crate::errors::{DocketError, Result};
use crate::schemas::{Case, CaseWorkflowState, TransitionRecord};

pub use file::FileCaseStore;
pub use memory::InMemoryCaseStore;

/// Result of a conditional commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// State and record were written together
    Committed,
    /// The stored version moved on; nothing was written
    VersionConflict { actual: u64 },
}

/// Storage backend for cases and their audit trails.
///
/// `commit_transition` must be atomic: either both the new state and the
/// record become visible, or neither does.
pub trait CaseStore {
    /// Persist a brand-new case
    fn create_case(&self, case: &Case) -> Result<()>;

    /// Load a case by id
    fn load_case(&self, case_id: &str) -> Result<Case>;

    /// All cases, ordered by id
    fn list_cases(&self) -> Result<Vec<Case>>;

    /// Write `new_state` and append `record` if the stored version equals `expected_version`
    fn commit_transition(
        &self,
        case_id: &str,
        new_state: &CaseWorkflowState,
        record: &TransitionRecord,
        expected_version: u64,
    ) -> Result<CommitOutcome>;

    /// Audit trail of a case, oldest first
    fn list_transitions(&self, case_id: &str) -> Result<Vec<TransitionRecord>>;
}

/// One case with its audit trail, stored as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDocument {
    pub case: Case,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord>,
}

impl CaseDocument {
    pub fn new(case: Case) -> Self {
        CaseDocument {
            case,
            transitions: Vec::new(),
        }
    }

    /// Apply a commit to this document if the version matches.
    ///
    /// Shared by every backend so the compare-and-swap rules are identical.
    pub(crate) fn apply_commit(
        &mut self,
        new_state: &CaseWorkflowState,
        record: &TransitionRecord,
        expected_version: u64,
    ) -> Result<CommitOutcome> {
        let actual = self.case.workflow.version;
        if actual != expected_version {
            return Ok(CommitOutcome::VersionConflict { actual });
        }

        if new_state.version != expected_version + 1
            || record.resulting_version() != new_state.version
            || record.case_id() != self.case.id
        {
            return Err(DocketError::CorruptState(format!(
                "commit for case {} does not follow version {}",
                self.case.id, expected_version
            )));
        }

        self.case.workflow = new_state.clone();
        self.case.updated_at = record.timestamp();
        self.transitions.push(record.clone());
        Ok(CommitOutcome::Committed)
    }
}

/// Reject persisted states the engine could never have produced
pub(crate) fn ensure_consistent(case: &Case) -> Result<()> {
    check_invariants(&case.workflow)
        .map_err(|reason| DocketError::CorruptState(format!("case {}: {}", case.id, reason)))
}
