//! Case lifecycle state machine definitions
//!
//! The transition table is data: each status maps to the fixed set of
//! statuses it may move to. There are no self-loops, and the terminal
//! statuses (closed, dismissed) have no outgoing edges.

use crate::schemas::CaseStatus;

/// Every case status, in display order.
pub const CASE_STATUSES: &[CaseStatus] = &[
    CaseStatus::Open,
    CaseStatus::InProgress,
    CaseStatus::OnHold,
    CaseStatus::Closed,
    CaseStatus::Dismissed,
];

/// Statuses with no outgoing transitions.
pub const TERMINAL_STATUSES: &[CaseStatus] = &[CaseStatus::Closed, CaseStatus::Dismissed];

/// Returns the statuses a case may move to from `current`.
///
/// Empty for terminal statuses.
pub fn get_allowed_next_statuses(current: CaseStatus) -> &'static [CaseStatus] {
    match current {
        CaseStatus::Open => &[CaseStatus::InProgress, CaseStatus::OnHold, CaseStatus::Dismissed],
        CaseStatus::InProgress => &[
            CaseStatus::Open,
            CaseStatus::OnHold,
            CaseStatus::Closed,
            CaseStatus::Dismissed,
        ],
        CaseStatus::OnHold => &[
            CaseStatus::Open,
            CaseStatus::InProgress,
            CaseStatus::Closed,
            CaseStatus::Dismissed,
        ],
        CaseStatus::Closed | CaseStatus::Dismissed => &[],
    }
}

/// Check if a status is terminal (closed or dismissed).
pub fn is_terminal_status(status: CaseStatus) -> bool {
    TERMINAL_STATUSES.contains(&status)
}

/// Whether the table has an edge `from -> to`.
pub fn is_allowed_transition(from: CaseStatus, to: CaseStatus) -> bool {
    get_allowed_next_statuses(from).contains(&to)
}
