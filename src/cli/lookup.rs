//! Lookup commands: `find` and `render`.

use anyhow::{Context, Result};
use std::path::Path;

use assetpack::asset::{Helper, find_file};

/// Resolve the compiled file for `name`, as a display string.
pub fn find(dir: &Path, name: &str, ext: &str, absolute: bool) -> Result<String> {
    let file = find_file(dir, name, ext, absolute)
        .with_context(|| format!("cannot resolve `{name}` ({ext})"))?;
    Ok(file.display().to_string())
}

/// Run a template helper and return its output.
pub fn render(helper: Helper, dir: &Path, name: &str, ext: Option<&str>) -> Result<String> {
    helper
        .call(dir, name, ext)
        .with_context(|| format!("{helper} failed for `{name}`"))
}
