//! File system utilities for docket
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, write_config, write_json};
pub use paths::{
    find_docket_root, get_case_dir, get_case_json_path, get_case_lock_path, get_cases_dir,
    get_config_path, get_docket_dir, resolve_cwd, DOCKET_DIR_NAME,
};
