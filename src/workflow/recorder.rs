//! Audit recording of successful transitions

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::TransitionError;
use crate::schemas::{CaseStatus, CaseWorkflowState, Config, TransitionRecord, TransitionRequest};
use crate::store::{CaseStore, CommitOutcome};

/// Source of transition timestamps
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Strip control characters (newline and tab survive) and cap the length.
///
/// Nothing else about the note is interpreted. A note that ends up empty is
/// dropped.
pub fn sanitize_note(note: &str, max_chars: usize) -> Option<String> {
    let cleaned: String = note
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(max_chars)
        .collect();
    if cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Turns an accepted transition into a durable audit entry.
#[derive(Debug, Clone)]
pub struct TransitionRecorder {
    note_max_chars: usize,
}

impl Default for TransitionRecorder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TransitionRecorder {
    pub fn new(note_max_chars: usize) -> Self {
        TransitionRecorder { note_max_chars }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.note_max_chars)
    }

    /// Build the audit entry for a transition the engine has already accepted.
    pub fn build_record(
        &self,
        case_id: &str,
        from_status: CaseStatus,
        request: &TransitionRequest,
        new_state: &CaseWorkflowState,
        clock: &dyn Clock,
    ) -> TransitionRecord {
        TransitionRecord::new(
            Uuid::new_v4(),
            case_id.to_string(),
            from_status,
            new_state.status,
            new_state.outcome.clone(),
            request
                .note
                .as_deref()
                .and_then(|note| sanitize_note(note, self.note_max_chars)),
            request.actor_id.clone(),
            clock.now(),
            new_state.version,
        )
    }

    /// Build the record and commit it with `new_state` in one conditional write.
    ///
    /// Must only be called with a state returned by the engine. Failures are
    /// not retried: a moved version becomes `ConcurrentModification`, any
    /// storage failure becomes `Persistence`.
    pub fn record<S: CaseStore + ?Sized>(
        &self,
        store: &S,
        case_id: &str,
        from_status: CaseStatus,
        request: &TransitionRequest,
        new_state: &CaseWorkflowState,
        clock: &dyn Clock,
    ) -> Result<TransitionRecord, TransitionError> {
        let record = self.build_record(case_id, from_status, request, new_state, clock);

        match store.commit_transition(case_id, new_state, &record, request.expected_version)? {
            CommitOutcome::Committed => Ok(record),
            CommitOutcome::VersionConflict { actual } => Err(TransitionError::ConcurrentModification {
                case_id: case_id.to_string(),
                expected: request.expected_version,
                actual,
            }),
        }
    }
}
