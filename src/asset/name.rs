//! Compiled file naming: `__<name>-<fingerprint><ext>`.

use std::path::{Path, PathBuf};

use glob::Pattern;

/// Filename prefix shared by every compiled version of `name`.
pub fn file_prefix(name: &str) -> String {
    format!("__{name}-")
}

/// Filename for a compiled bundle.
pub fn file_name(name: &str, fingerprint: &str, ext: &str) -> String {
    format!("{}{fingerprint}{ext}", file_prefix(name))
}

/// Destination path of a compiled bundle inside `dir`.
pub fn output_path(dir: &Path, name: &str, fingerprint: &str, ext: &str) -> PathBuf {
    dir.join(file_name(name, fingerprint, ext))
}

/// Glob matching every compiled version of `name` with extension `ext` in `dir`.
///
/// Literal parts are escaped so names and directories containing glob
/// metacharacters only match themselves.
pub fn glob_pattern(dir: &Path, name: &str, ext: &str) -> String {
    let dir = Pattern::escape(&dir.to_string_lossy());
    let file = format!(
        "{}*{}",
        Pattern::escape(&file_prefix(name)),
        Pattern::escape(ext)
    );
    Path::new(&dir).join(file).to_string_lossy().into_owned()
}
