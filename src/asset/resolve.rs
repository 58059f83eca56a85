//! Compiled file lookup.
//!
//! A logical name resolves only when exactly one compiled file matches.
//! Zero matches means the bundle was never compiled (or was cleaned);
//! several means a cleanup failed or two compiles raced. Neither case is
//! guessed around.

use std::path::{Path, PathBuf};

use super::{AssetError, AssetResult, name};
use crate::utils::path::url_path;

/// List every compiled version of `name` with extension `ext` in `dir`.
pub fn matching_files(dir: &Path, name: &str, ext: &str) -> AssetResult<Vec<PathBuf>> {
    let pattern = name::glob_pattern(dir, name, ext);
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        files.push(entry?);
    }
    Ok(files)
}

/// Find the single compiled file for `name` in `dir`.
///
/// With `absolute`, the match is returned rooted at `/` (for use as a URL
/// path) instead of relative to the working directory.
pub fn find_file(dir: &Path, name: &str, ext: &str, absolute: bool) -> AssetResult<PathBuf> {
    let mut files = matching_files(dir, name, ext)?;

    let file = match files.len() {
        0 => {
            return Err(AssetError::NotFound {
                dir: dir.to_path_buf(),
                name: name.to_owned(),
            });
        }
        1 => files.remove(0),
        count => {
            return Err(AssetError::Ambiguous {
                dir: dir.to_path_buf(),
                name: name.to_owned(),
                count,
            });
        }
    };

    if absolute {
        Ok(PathBuf::from(url_path(&file)))
    } else {
        Ok(file)
    }
}

/// URL-style path of a compiled image (`/<dir>/__<name>-<hash><ext>`).
pub fn img_path(dir: &Path, name: &str, ext: &str) -> AssetResult<String> {
    find_file(dir, name, ext, false).map(|file| url_path(&file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_file_empty_dir() {
        let dir = TempDir::new().unwrap();
        let err = find_file(dir.path(), "app", ".min.css", false).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { ref name, .. } if name == "app"));
    }

    #[test]
    fn test_find_file_ignores_other_names_and_exts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("__vendor-1.min.css"), "").unwrap();
        fs::write(dir.path().join("__app-1.min.js"), "").unwrap();
        fs::write(dir.path().join("app-1.min.css"), "").unwrap();

        let err = find_file(dir.path(), "app", ".min.css", false).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[test]
    fn test_find_file_ambiguous() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("__app-aaa.min.css"), "").unwrap();
        fs::write(dir.path().join("__app-bbb.min.css"), "").unwrap();

        let err = find_file(dir.path(), "app", ".min.css", false).unwrap_err();
        assert!(matches!(err, AssetError::Ambiguous { count: 2, .. }));
        assert!(err.to_string().starts_with("more than one file found"));
    }

    #[test]
    fn test_find_file_single_match() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("__app-abc.min.js");
        fs::write(&file, "x").unwrap();

        assert_eq!(find_file(dir.path(), "app", ".min.js", false).unwrap(), file);
    }

    #[test]
    fn test_find_file_absolute() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("__app-abc.min.js");
        fs::write(&file, "x").unwrap();

        let found = find_file(dir.path(), "app", ".min.js", true).unwrap();
        assert!(found.is_absolute());
        assert_eq!(found.to_string_lossy(), url_path(&file));
    }

    #[test]
    fn test_img_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("__logo-0123.png");
        fs::write(&file, "png").unwrap();

        let path = img_path(dir.path(), "logo", ".png").unwrap();
        assert!(path.starts_with('/'));
        assert!(path.ends_with("/__logo-0123.png"));
        assert!(img_path(dir.path(), "logo", ".svg").is_err());
    }
}
