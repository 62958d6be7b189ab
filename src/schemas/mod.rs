//! Schema types for docket
//!
//! Everything here is plain data with serde derives; lifecycle rules live in
//! `crate::domain`.

mod case;
mod config;
mod record;
mod request;

pub use case::{validate_case_id, Case, CaseOutcome, CaseStatus, CaseWorkflowState};
pub use config::Config;
pub use record::TransitionRecord;
pub use request::TransitionRequest;
