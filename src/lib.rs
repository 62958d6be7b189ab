//! Docket - case lifecycle workflow engine for legal-matter tracking
//!
//! This library provides:
//! - Schema definitions for cases, transition requests and audit records
//! - Domain logic for case statuses and transitions (pure, no I/O)
//! - The status-change workflow: authorization, decision, audit recording
//! - Case stores with optimistic-concurrency commits (in-memory and file-backed)
//! - File system and configuration utilities for the `docket` CLI

pub mod cli;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use domain::CaseLifecycleEngine;
pub use errors::{DocketError, FailureKind, Result, TransitionError};
pub use schemas::{Case, CaseOutcome, CaseStatus, CaseWorkflowState, TransitionRecord, TransitionRequest};
pub use store::{CaseStore, FileCaseStore, InMemoryCaseStore};
pub use workflow::{CaseWorkflowService, ChangeStatusResponse, StatusChanged};
