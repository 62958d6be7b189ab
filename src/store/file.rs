//! File-backed case store
//!
//! Each case lives in `.docket/cases/<id>/case.json` together with its audit
//! trail, so a commit is a single atomic file replacement. Writers take an
//! in-process mutex and a `case.lock` file created with `create_new`, which
//! keeps two processes from interleaving read-compare-write on one case.
//!
//! A lock file records the pid and time of its owner. One older than
//! [`STALE_LOCK_AFTER`] was left by a process that died mid-commit and is
//! broken by the next writer.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::{DocketError, Result};
use crate::fs::{
    get_case_dir, get_case_json_path, get_case_lock_path, get_cases_dir, read_json, write_json,
};
use crate::schemas::{validate_case_id, Case, CaseWorkflowState, TransitionRecord};

use super::{ensure_consistent, CaseDocument, CaseStore, CommitOutcome};

#[derive(Debug)]
pub struct FileCaseStore {
    root: PathBuf,
    write_guard: Mutex<()>,
}

/// A commit holds its lock for milliseconds; anything this old is abandoned.
pub const STALE_LOCK_AFTER: Duration = Duration::from_secs(30);

/// Holds a case's lock file until dropped
struct CaseLock {
    path: PathBuf,
}

impl CaseLock {
    fn acquire(root: &Path, case_id: &str) -> Result<Self> {
        let path = get_case_lock_path(root, case_id);
        match Self::create(&path) {
            Err(DocketError::Locked(_)) if Self::is_stale(&path) => {
                let owner = fs::read_to_string(&path).unwrap_or_default();
                warn!(case_id, owner = owner.trim(), "breaking stale case lock");
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(DocketError::Io(e)),
                }
                Self::create(&path).map_err(|e| Self::explain(e, case_id))
            }
            other => other.map_err(|e| Self::explain(e, case_id)),
        }
    }

    fn create(path: &Path) -> Result<Self> {
        match fs::OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                let lock = CaseLock {
                    path: path.to_path_buf(),
                };
                writeln!(file, "{} {}", std::process::id(), Utc::now().to_rfc3339())?;
                Ok(lock)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(DocketError::Locked(path.display().to_string()))
            }
            Err(e) => Err(DocketError::Io(e)),
        }
    }

    fn is_stale(path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age > STALE_LOCK_AFTER)
    }

    fn explain(error: DocketError, case_id: &str) -> DocketError {
        match error {
            DocketError::Locked(path) => DocketError::Locked(format!(
                "{} is being changed by another docket process (lock {})",
                case_id, path
            )),
            other => other,
        }
    }
}

impl Drop for CaseLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to release case lock");
        }
    }
}

impl FileCaseStore {
    /// Store rooted at the directory that contains `.docket`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileCaseStore {
            root: root.into(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_document(&self, case_id: &str) -> Result<CaseDocument> {
        validate_case_id(case_id)?;
        let doc: CaseDocument = read_json(&get_case_json_path(&self.root, case_id)).map_err(|e| match e {
            DocketError::FileNotFound(_) => DocketError::CaseNotFound(case_id.to_string()),
            other => other,
        })?;
        ensure_consistent(&doc.case)?;
        Ok(doc)
    }

    fn write_document(&self, doc: &CaseDocument) -> Result<()> {
        write_json(&get_case_json_path(&self.root, &doc.case.id), doc)
    }
}

impl CaseStore for FileCaseStore {
    fn create_case(&self, case: &Case) -> Result<()> {
        validate_case_id(&case.id)?;
        ensure_consistent(case)?;
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| DocketError::Locked("file store mutex poisoned".to_string()))?;

        let dir = get_case_dir(&self.root, &case.id);
        if get_case_json_path(&self.root, &case.id).exists() {
            return Err(DocketError::CaseExists(case.id.clone()));
        }
        fs::create_dir_all(&dir)?;

        let _lock = CaseLock::acquire(&self.root, &case.id)?;
        self.write_document(&CaseDocument::new(case.clone()))?;
        debug!(case_id = %case.id, "case created");
        Ok(())
    }

    fn load_case(&self, case_id: &str) -> Result<Case> {
        Ok(self.read_document(case_id)?.case)
    }

    fn list_cases(&self) -> Result<Vec<Case>> {
        let dir = get_cases_dir(&self.root);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut cases = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if validate_case_id(&name).is_err() || !get_case_json_path(&self.root, &name).exists() {
                debug!(entry = %name, "skipping non-case directory");
                continue;
            }
            cases.push(self.load_case(&name)?);
        }
        cases.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(cases)
    }

    fn commit_transition(
        &self,
        case_id: &str,
        new_state: &CaseWorkflowState,
        record: &TransitionRecord,
        expected_version: u64,
    ) -> Result<CommitOutcome> {
        validate_case_id(case_id)?;
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| DocketError::Locked("file store mutex poisoned".to_string()))?;
        if !get_case_json_path(&self.root, case_id).exists() {
            return Err(DocketError::CaseNotFound(case_id.to_string()));
        }
        let _lock = CaseLock::acquire(&self.root, case_id)?;

        let mut doc = self.read_document(case_id)?;
        let outcome = doc.apply_commit(new_state, record, expected_version)?;
        if outcome == CommitOutcome::Committed {
            self.write_document(&doc)?;
        }
        Ok(outcome)
    }

    fn list_transitions(&self, case_id: &str) -> Result<Vec<TransitionRecord>> {
        Ok(self.read_document(case_id)?.transitions)
    }
}
