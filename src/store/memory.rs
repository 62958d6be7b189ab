//! In-memory case store
//!
//! Everything sits behind one mutex, which makes the conditional commit a
//! plain compare-and-swap.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::errors::{DocketError, Result};
use crate::schemas::{validate_case_id, Case, CaseWorkflowState, TransitionRecord};

use super::{ensure_consistent, CaseDocument, CaseStore, CommitOutcome};

#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: Mutex<BTreeMap<String, CaseDocument>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given cases
    pub fn with_cases(cases: impl IntoIterator<Item = Case>) -> Result<Self> {
        let store = Self::new();
        for case in cases {
            store.create_case(&case)?;
        }
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, CaseDocument>>> {
        self.cases
            .lock()
            .map_err(|_| DocketError::Locked("in-memory store mutex poisoned".to_string()))
    }
}

impl CaseStore for InMemoryCaseStore {
    fn create_case(&self, case: &Case) -> Result<()> {
        validate_case_id(&case.id)?;
        ensure_consistent(case)?;
        let mut cases = self.lock()?;
        if cases.contains_key(&case.id) {
            return Err(DocketError::CaseExists(case.id.clone()));
        }
        cases.insert(case.id.clone(), CaseDocument::new(case.clone()));
        Ok(())
    }

    fn load_case(&self, case_id: &str) -> Result<Case> {
        let cases = self.lock()?;
        cases
            .get(case_id)
            .map(|doc| doc.case.clone())
            .ok_or_else(|| DocketError::CaseNotFound(case_id.to_string()))
    }

    fn list_cases(&self) -> Result<Vec<Case>> {
        Ok(self.lock()?.values().map(|doc| doc.case.clone()).collect())
    }

    fn commit_transition(
        &self,
        case_id: &str,
        new_state: &CaseWorkflowState,
        record: &TransitionRecord,
        expected_version: u64,
    ) -> Result<CommitOutcome> {
        let mut cases = self.lock()?;
        let doc = cases
            .get_mut(case_id)
            .ok_or_else(|| DocketError::CaseNotFound(case_id.to_string()))?;
        doc.apply_commit(new_state, record, expected_version)
    }

    fn list_transitions(&self, case_id: &str) -> Result<Vec<TransitionRecord>> {
        let cases = self.lock()?;
        cases
            .get(case_id)
            .map(|doc| doc.transitions.clone())
            .ok_or_else(|| DocketError::CaseNotFound(case_id.to_string()))
    }
}
