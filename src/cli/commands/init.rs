//! Init command - create the .docket directory

use std::path::Path;

use crate::errors::{DocketError, Result};
use crate::fs::{get_cases_dir, get_config_path, resolve_cwd, write_config};
use crate::schemas::Config;

/// Initialize .docket in the working directory
pub async fn run(cwd: Option<&Path>, force: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let config_path = get_config_path(&root);

    if config_path.exists() && !force {
        return Err(DocketError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    std::fs::create_dir_all(get_cases_dir(&root))?;
    write_config(&root, &Config::default())?;

    tracing::info!(root = %root.display(), "initialized docket");
    println!("Initialized docket in {}", root.display());
    Ok(())
}
