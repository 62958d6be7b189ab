//! Domain logic for case lifecycle statuses and transitions

mod states;
mod transitions;
mod validation;


pub use states::{
    get_allowed_next_statuses, is_allowed_transition, is_terminal_status, CASE_STATUSES,
    TERMINAL_STATUSES,
};
pub use transitions::{apply_transition, CaseLifecycleEngine};
pub use validation::{check_invariants, validate_outcome, validate_transition};
