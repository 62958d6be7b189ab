//! Case schema - lifecycle status, outcome and the persisted case record

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{DocketError, Result};

lazy_static::lazy_static! {
    static ref CASE_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").unwrap();
}

/// Lifecycle status of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Newly opened, no work started
    Open,
    /// Actively being worked
    InProgress,
    /// Paused pending an external event
    OnHold,
    /// Concluded with an outcome
    Closed,
    /// Dismissed with an outcome
    Dismissed,
}

impl CaseStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::OnHold => "on_hold",
            CaseStatus::Closed => "closed",
            CaseStatus::Dismissed => "dismissed",
        }
    }

    /// Label shown to people
    pub fn human_label(&self) -> &'static str {
        match self {
            CaseStatus::Open => "Open",
            CaseStatus::InProgress => "In Progress",
            CaseStatus::OnHold => "On Hold",
            CaseStatus::Closed => "Closed",
            CaseStatus::Dismissed => "Dismissed",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "open" => Ok(CaseStatus::Open),
            "in_progress" => Ok(CaseStatus::InProgress),
            "on_hold" => Ok(CaseStatus::OnHold),
            "closed" => Ok(CaseStatus::Closed),
            "dismissed" => Ok(CaseStatus::Dismissed),
            _ => Err(format!("Unknown case status: {}", s)),
        }
    }
}

/// How a case concluded.
///
/// The set of codes is open: anything not listed here is kept verbatim in
/// [`CaseOutcome::Other`]. A blank code is not an outcome and fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CaseOutcome {
    Settled,
    DismissedWithPrejudice,
    DismissedWithoutPrejudice,
    JudgmentForPlaintiff,
    JudgmentForDefendant,
    Withdrawn,
    Resolved,
    Other(String),
}

impl CaseOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            CaseOutcome::Settled => "settled",
            CaseOutcome::DismissedWithPrejudice => "dismissed_with_prejudice",
            CaseOutcome::DismissedWithoutPrejudice => "dismissed_without_prejudice",
            CaseOutcome::JudgmentForPlaintiff => "judgment_for_plaintiff",
            CaseOutcome::JudgmentForDefendant => "judgment_for_defendant",
            CaseOutcome::Withdrawn => "withdrawn",
            CaseOutcome::Resolved => "resolved",
            CaseOutcome::Other(code) => code,
        }
    }

    /// True when the code carries no text at all
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl TryFrom<String> for CaseOutcome {
    type Error = String;

    fn try_from(code: String) -> std::result::Result<Self, Self::Error> {
        let code = code.trim();
        if code.is_empty() {
            return Err("Outcome code cannot be empty".to_string());
        }
        Ok(match code.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "settled" => CaseOutcome::Settled,
            "dismissed_with_prejudice" => CaseOutcome::DismissedWithPrejudice,
            "dismissed_without_prejudice" => CaseOutcome::DismissedWithoutPrejudice,
            "judgment_for_plaintiff" => CaseOutcome::JudgmentForPlaintiff,
            "judgment_for_defendant" => CaseOutcome::JudgmentForDefendant,
            "withdrawn" => CaseOutcome::Withdrawn,
            "resolved" => CaseOutcome::Resolved,
            _ => CaseOutcome::Other(code.to_string()),
        })
    }
}

impl From<CaseOutcome> for String {
    fn from(outcome: CaseOutcome) -> Self {
        outcome.as_str().to_string()
    }
}

impl std::fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CaseOutcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CaseOutcome::try_from(s.to_string())
    }
}

/// The part of a case the lifecycle engine reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseWorkflowState {
    /// Current lifecycle status
    pub status: CaseStatus,

    /// Set only on a terminal transition, never cleared afterwards
    #[serde(default)]
    pub outcome: Option<CaseOutcome>,

    /// Bumped by exactly one on every successful transition
    pub version: u64,
}

impl CaseWorkflowState {
    /// State of a freshly opened case
    pub fn new() -> Self {
        CaseWorkflowState {
            status: CaseStatus::Open,
            outcome: None,
            version: 0,
        }
    }
}

impl Default for CaseWorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

/// A legal case as persisted by the case store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique case identifier (also the storage key)
    pub id: String,

    /// Human-readable caption
    pub title: String,

    /// Optional practice area (e.g. "litigation", "foil")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matter_type: Option<String>,

    /// Actors allowed to change this case besides administrators
    #[serde(default)]
    pub assigned_to: Vec<String>,

    /// Lifecycle state
    pub workflow: CaseWorkflowState,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Create a new open case at version 0
    pub fn new(id: String, title: String, now: DateTime<Utc>) -> Self {
        Case {
            schema_version: 1,
            id,
            title,
            matter_type: None,
            assigned_to: Vec::new(),
            workflow: CaseWorkflowState::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_matter_type(mut self, matter_type: Option<String>) -> Self {
        self.matter_type = matter_type;
        self
    }

    pub fn with_assignees(mut self, assigned_to: Vec<String>) -> Self {
        self.assigned_to = assigned_to;
        self
    }

    /// Return a new Case carrying the given workflow state
    pub fn with_workflow(mut self, workflow: CaseWorkflowState, now: DateTime<Utc>) -> Self {
        self.workflow = workflow;
        self.updated_at = now;
        self
    }

    pub fn is_assigned(&self, actor_id: &str) -> bool {
        self.assigned_to.iter().any(|a| a == actor_id)
    }
}

/// Check that a case id is usable as a storage key
pub fn validate_case_id(id: &str) -> Result<()> {
    if CASE_ID_REGEX.is_match(id) {
        Ok(())
    } else {
        Err(DocketError::InvalidCaseId(format!(
            "'{}' must start with a letter or digit and contain only letters, digits, '.', '_' or '-' (max 64 chars)",
            id
        )))
    }
}
