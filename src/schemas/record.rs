//! Transition record - the immutable audit entry of one status change

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CaseOutcome, CaseStatus};

/// One entry of a case's audit trail.
///
/// Fields are private so an entry cannot be edited once built; readers go
/// through the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    record_id: Uuid,
    case_id: String,
    from_status: CaseStatus,
    to_status: CaseStatus,
    #[serde(default)]
    outcome: Option<CaseOutcome>,
    #[serde(default)]
    note: Option<String>,
    actor_id: String,
    timestamp: DateTime<Utc>,
    resulting_version: u64,
}

impl TransitionRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        record_id: Uuid,
        case_id: String,
        from_status: CaseStatus,
        to_status: CaseStatus,
        outcome: Option<CaseOutcome>,
        note: Option<String>,
        actor_id: String,
        timestamp: DateTime<Utc>,
        resulting_version: u64,
    ) -> Self {
        TransitionRecord {
            record_id,
            case_id,
            from_status,
            to_status,
            outcome,
            note,
            actor_id,
            timestamp,
            resulting_version,
        }
    }

    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn from_status(&self) -> CaseStatus {
        self.from_status
    }

    pub fn to_status(&self) -> CaseStatus {
        self.to_status
    }

    pub fn outcome(&self) -> Option<&CaseOutcome> {
        self.outcome.as_ref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn resulting_version(&self) -> u64 {
        self.resulting_version
    }
}
