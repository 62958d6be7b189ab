//! CLI command implementations

pub mod history;
pub mod init;
pub mod list;
pub mod next;
pub mod open;
pub mod show;
pub mod transition;

use std::path::{Path, PathBuf};

use crate::errors::{DocketError, Result};
use crate::fs::{find_docket_root, read_config, resolve_cwd};
use crate::schemas::Config;
use crate::store::FileCaseStore;

/// Resolved docket root with its config and store
pub(crate) struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    pub store: FileCaseStore,
}

impl Workspace {
    pub fn open(cwd: Option<&Path>) -> Result<Self> {
        let root = find_docket_root(&resolve_cwd(cwd))?;
        let config = read_config(&root)?;
        let store = FileCaseStore::new(&root);
        Ok(Workspace { root, config, store })
    }
}

pub(crate) fn require_actor(actor: Option<&str>) -> Result<String> {
    match actor.map(str::trim) {
        Some(actor) if !actor.is_empty() => Ok(actor.to_string()),
        _ => Err(DocketError::ConfigError(
            "No actor given: pass --actor or set DOCKET_ACTOR".to_string(),
        )),
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| DocketError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_actor() {
        assert_eq!(require_actor(Some(" alice ")).unwrap(), "alice");
        assert_eq!(require_actor(Some("")).unwrap_err().code(), "CONFIG_ERROR");
        assert!(require_actor(None).is_err());
    }
}
