//! Path resolution utilities for docket
//!
//! Provides functions to locate the docket root and construct paths
//! to the config and per-case files.

use std::path::{Path, PathBuf};

use crate::errors::{DocketError, Result};

/// Name of the directory holding docket data
pub const DOCKET_DIR_NAME: &str = ".docket";

/// Find the nearest directory containing a .docket directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `DocketNotFound` - If no ancestor contains .docket
pub fn find_docket_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| DocketError::DocketNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(DOCKET_DIR_NAME).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(DocketError::DocketNotFound(
                    "Could not find a .docket directory; run `docket init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .docket directory.
pub fn get_docket_dir(root: &Path) -> PathBuf {
    root.join(DOCKET_DIR_NAME)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_docket_dir(root).join("config.json")
}

/// Get the path to the cases directory.
pub fn get_cases_dir(root: &Path) -> PathBuf {
    get_docket_dir(root).join("cases")
}

/// Get the path to a specific case's directory.
pub fn get_case_dir(root: &Path, id: &str) -> PathBuf {
    get_cases_dir(root).join(id)
}

/// Get the path to a case's case.json file (snapshot plus audit trail).
pub fn get_case_json_path(root: &Path, id: &str) -> PathBuf {
    get_case_dir(root, id).join("case.json")
}

/// Get the path to a case's writer lock file.
pub fn get_case_lock_path(root: &Path, id: &str) -> PathBuf {
    get_case_dir(root, id).join("case.lock")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".docket")).unwrap();
        temp
    }

    #[test]
    fn test_find_docket_root_from_root() {
        let temp = setup_root();
        let root = find_docket_root(temp.path()).unwrap();
        assert_eq!(root.canonicalize().unwrap(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_docket_root_from_subdir() {
        let temp = setup_root();
        let subdir = temp.path().join("matters").join("2024");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = find_docket_root(&subdir).unwrap();
        assert_eq!(root.canonicalize().unwrap(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_docket_root_not_found() {
        let temp = TempDir::new().unwrap();

        let result = find_docket_root(temp.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("docket init"));
    }

    #[test]
    fn test_get_case_paths() {
        let root = PathBuf::from("/office");
        let id = "CASE-001";

        assert_eq!(get_config_path(&root), PathBuf::from("/office/.docket/config.json"));
        assert_eq!(get_case_dir(&root, id), PathBuf::from("/office/.docket/cases/CASE-001"));
        assert_eq!(
            get_case_json_path(&root, id),
            PathBuf::from("/office/.docket/cases/CASE-001/case.json")
        );
        assert_eq!(
            get_case_lock_path(&root, id),
            PathBuf::from("/office/.docket/cases/CASE-001/case.lock")
        );
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        assert_eq!(resolve_cwd(Some(&path)), path);
    }
}
