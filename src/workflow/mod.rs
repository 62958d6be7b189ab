//! Case status workflow: authorization, decision, audit
//!
//! ```text
//! change_case_status
//!     │
//!     ├─► CaseStore::load_case
//!     ├─► TransitionAuthorizer::attempt ──► CaseLifecycleEngine::transition
//!     └─► TransitionRecorder::record ────► CaseStore::commit_transition
//! ```

mod authorizer;
mod recorder;
mod service;


pub use authorizer::{AllowAll, CaseAuthorization, PolicyAuthorization, TransitionAuthorizer};
pub use recorder::{sanitize_note, Clock, FixedClock, SystemClock, TransitionRecorder};
pub use service::{CaseWorkflowService, ChangeStatusResponse, StatusChanged};
