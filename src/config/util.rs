//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the manifest by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the manifest if found
///
/// # Example
/// ```text
/// /home/user/site/static/css/   ← start
/// /home/user/site/assetpack.toml ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}
