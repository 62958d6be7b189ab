//! Transition request - caller input for a status change

use serde::{Deserialize, Serialize};

use super::{CaseOutcome, CaseStatus};

/// A request to move a case to another status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Requested status
    pub target_status: CaseStatus,

    /// Why the case ended; only for terminal targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CaseOutcome>,

    /// Free-text rationale recorded in the audit trail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Who is asking
    pub actor_id: String,

    /// The case version the caller last observed
    pub expected_version: u64,
}

impl TransitionRequest {
    pub fn new(target_status: CaseStatus, actor_id: impl Into<String>, expected_version: u64) -> Self {
        TransitionRequest {
            target_status,
            outcome: None,
            note: None,
            actor_id: actor_id.into(),
            expected_version,
        }
    }

    pub fn with_outcome(mut self, outcome: CaseOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
