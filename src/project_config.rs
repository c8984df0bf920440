//! Discovery and parsing of `.cppcheck-config` files.
//!
//! The file is looked up like `.clang-format`: starting in the directory of
//! the analyzed source file and walking up until the filesystem root.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

/// Name of the per-project parameter file.
pub const CONFIG_FILE_NAME: &str = ".cppcheck-config";

#[derive(Debug, Error)]
pub enum ProjectConfigError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
}

/// Finds the nearest `.cppcheck-config` for `file_path`.
///
/// `file_path` must be absolute with `..` already resolved (see
/// [`Config::resolve_path`](crate::config::Config::resolve_path)), otherwise
/// the walk visits lexical parents that are not ancestors of the file.
/// Returns `None` once the root has been checked without a match.
pub fn find_cppcheck_config(file_path: &Path) -> Option<PathBuf> {
    let mut current_dir = file_path.parent()?;

    loop {
        let candidate = current_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!("Found {}", candidate.display());
            return Some(candidate);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent,
            None => return None,
        }
    }
}

/// Reads the parameters from a `.cppcheck-config` file.
pub fn read_cppcheck_config(config_path: &Path) -> Result<Vec<String>, ProjectConfigError> {
    let content = fs::read_to_string(config_path)
        .map_err(|e| ProjectConfigError::Read(config_path.to_path_buf(), e))?;

    Ok(parse_cppcheck_config(&content))
}

/// One parameter per line; blank lines and `#` comments are skipped.
pub fn parse_cppcheck_config(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
