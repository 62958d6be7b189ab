//! Error types for docket
//!
//! Two families live here:
//! - [`DocketError`] covers the ambient failures of the tool (I/O, JSON,
//!   configuration, missing cases).
//! - [`TransitionError`] is the typed result of a status-change request. Every
//!   variant maps to a [`FailureKind`] so callers can render a specific
//!   message per kind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schemas::{CaseOutcome, CaseStatus};

/// Result type alias for docket operations
pub type Result<T> = std::result::Result<T, DocketError>;

/// Main error type for all non-transition docket operations
#[derive(Debug, Error)]
pub enum DocketError {
    /// No .docket directory found above the working directory
    #[error("Docket directory not found: {0}")]
    DocketNotFound(String),

    /// Case does not exist in the store
    #[error("Case not found: {0}")]
    CaseNotFound(String),

    /// Case already exists in the store
    #[error("Case already exists: {0}")]
    CaseExists(String),

    /// Case id is not usable as a storage key
    #[error("Invalid case id: {0}")]
    InvalidCaseId(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Persisted case state breaks a workflow invariant
    #[error("Corrupt case state: {0}")]
    CorruptState(String),

    /// Another writer holds the case lock
    #[error("Case is locked: {0}")]
    Locked(String),

    /// Workflow state transition error
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl DocketError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            DocketError::DocketNotFound(_) => "DOCKET_NOT_FOUND",
            DocketError::CaseNotFound(_) => "CASE_NOT_FOUND",
            DocketError::CaseExists(_) => "CASE_EXISTS",
            DocketError::InvalidCaseId(_) => "INVALID_CASE_ID",
            DocketError::InvalidJson(_) => "INVALID_JSON",
            DocketError::FileNotFound(_) => "FILE_NOT_FOUND",
            DocketError::ConfigError(_) => "CONFIG_ERROR",
            DocketError::CorruptState(_) => "CORRUPT_STATE",
            DocketError::Locked(_) => "LOCKED",
            DocketError::Transition(e) => e.code(),
            DocketError::Io(_) => "IO_ERROR",
            DocketError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        DocketError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// The failure categories a status-change request can end in.
///
/// These are the kinds exposed to the surrounding application; the UI picks
/// its message from the kind, not from the free-text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidTransition,
    SelfTransition,
    MissingOutcome,
    OutcomeNotApplicable,
    Forbidden,
    ConcurrentModification,
    PersistenceError,
}

impl FailureKind {
    /// True for failures caused by the shape of the request itself
    pub fn is_workflow_error(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidTransition
                | FailureKind::SelfTransition
                | FailureKind::MissingOutcome
                | FailureKind::OutcomeNotApplicable
        )
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::InvalidTransition => "invalid_transition",
            FailureKind::SelfTransition => "self_transition",
            FailureKind::MissingOutcome => "missing_outcome",
            FailureKind::OutcomeNotApplicable => "outcome_not_applicable",
            FailureKind::Forbidden => "forbidden",
            FailureKind::ConcurrentModification => "concurrent_modification",
            FailureKind::PersistenceError => "persistence_error",
        };
        write!(f, "{}", s)
    }
}

/// Why a status-change request was rejected.
///
/// None of these are retried internally; each is terminal to the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot transition case from {from} to {to}")]
    InvalidTransition { from: CaseStatus, to: CaseStatus },

    #[error("case is already {status}")]
    SelfTransition { status: CaseStatus },

    #[error("an outcome is required to move a case to {target}")]
    MissingOutcome { target: CaseStatus },

    #[error("outcome {outcome} cannot be recorded on a case moving to {target}")]
    OutcomeNotApplicable {
        target: CaseStatus,
        outcome: CaseOutcome,
    },

    #[error("actor {actor_id} is not allowed to change case {case_id}")]
    Forbidden { actor_id: String, case_id: String },

    #[error("case {case_id} was modified concurrently (expected version {expected}, found {actual})")]
    ConcurrentModification {
        case_id: String,
        expected: u64,
        actual: u64,
    },

    #[error("failed to persist transition: {0}")]
    Persistence(String),
}

impl TransitionError {
    /// The external failure category of this error
    pub fn kind(&self) -> FailureKind {
        match self {
            TransitionError::InvalidTransition { .. } => FailureKind::InvalidTransition,
            TransitionError::SelfTransition { .. } => FailureKind::SelfTransition,
            TransitionError::MissingOutcome { .. } => FailureKind::MissingOutcome,
            TransitionError::OutcomeNotApplicable { .. } => FailureKind::OutcomeNotApplicable,
            TransitionError::Forbidden { .. } => FailureKind::Forbidden,
            TransitionError::ConcurrentModification { .. } => FailureKind::ConcurrentModification,
            TransitionError::Persistence(_) => FailureKind::PersistenceError,
        }
    }

    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self.kind() {
            FailureKind::InvalidTransition => "INVALID_TRANSITION",
            FailureKind::SelfTransition => "SELF_TRANSITION",
            FailureKind::MissingOutcome => "MISSING_OUTCOME",
            FailureKind::OutcomeNotApplicable => "OUTCOME_NOT_APPLICABLE",
            FailureKind::Forbidden => "FORBIDDEN",
            FailureKind::ConcurrentModification => "CONCURRENT_MODIFICATION",
            FailureKind::PersistenceError => "PERSISTENCE_ERROR",
        }
    }
}

impl From<DocketError> for TransitionError {
    fn from(error: DocketError) -> Self {
        match error {
            DocketError::Transition(inner) => inner,
            other => TransitionError::Persistence(other.to_string()),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &DocketError) -> i32 {
    match error {
        DocketError::Transition(e) => match e.kind() {
            FailureKind::Forbidden => 77,              // EX_NOPERM
            FailureKind::ConcurrentModification => 75, // EX_TEMPFAIL
            _ => 1,
        },
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DocketError::DocketNotFound("test".into()).code(), "DOCKET_NOT_FOUND");
        assert_eq!(DocketError::CaseNotFound("test".into()).code(), "CASE_NOT_FOUND");
        assert_eq!(DocketError::CaseExists("test".into()).code(), "CASE_EXISTS");
        assert_eq!(DocketError::InvalidCaseId("test".into()).code(), "INVALID_CASE_ID");
        assert_eq!(DocketError::InvalidJson("test".into()).code(), "INVALID_JSON");
        assert_eq!(DocketError::FileNotFound("test".into()).code(), "FILE_NOT_FOUND");
        assert_eq!(DocketError::ConfigError("test".into()).code(), "CONFIG_ERROR");
        assert_eq!(DocketError::CorruptState("test".into()).code(), "CORRUPT_STATE");
        assert_eq!(DocketError::Locked("test".into()).code(), "LOCKED");
    }

    #[test]
    fn test_transition_error_kinds() {
        let err = TransitionError::InvalidTransition {
            from: CaseStatus::Closed,
            to: CaseStatus::Open,
        };
        assert_eq!(err.kind(), FailureKind::InvalidTransition);
        assert_eq!(err.code(), "INVALID_TRANSITION");
        assert!(err.kind().is_workflow_error());

        let err = TransitionError::Forbidden {
            actor_id: "alice".into(),
            case_id: "CASE-1".into(),
        };
        assert_eq!(err.kind(), FailureKind::Forbidden);
        assert!(!err.kind().is_workflow_error());
        assert!(err.to_string().contains("alice"));
    }

    #[test]
    fn test_transition_error_passes_through_docket_error() {
        let inner = TransitionError::SelfTransition {
            status: CaseStatus::Open,
        };
        let wrapped = DocketError::from(inner.clone());
        assert_eq!(wrapped.code(), "SELF_TRANSITION");
        assert_eq!(TransitionError::from(wrapped), inner);
    }

    #[test]
    fn test_store_errors_become_persistence_errors() {
        let err = TransitionError::from(DocketError::Locked("CASE-1".into()));
        assert_eq!(err.kind(), FailureKind::PersistenceError);
        assert!(err.to_string().contains("CASE-1"));
    }

    #[test]
    fn test_exit_codes() {
        let forbidden = DocketError::from(TransitionError::Forbidden {
            actor_id: "a".into(),
            case_id: "c".into(),
        });
        let conflict = DocketError::from(TransitionError::ConcurrentModification {
            case_id: "c".into(),
            expected: 1,
            actual: 2,
        });
        assert_eq!(to_exit_code(&forbidden), 77);
        assert_eq!(to_exit_code(&conflict), 75);
        assert_eq!(to_exit_code(&DocketError::CaseNotFound("c".into())), 1);
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = DocketError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }

    #[test]
    fn test_failure_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&FailureKind::ConcurrentModification).unwrap(),
            "\"concurrent_modification\""
        );
        assert_eq!(FailureKind::PersistenceError.to_string(), "persistence_error");
    }
}
