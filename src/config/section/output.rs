//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! dir = "public/assets"
//! write_order = "write-then-delete"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::WriteOrder;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory compiled bundles are written to (relative to the manifest).
    pub dir: PathBuf,
    /// Whether stale bundles are removed before or after the new one is written.
    pub write_order: WriteOrder,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "public".into(),
            write_order: WriteOrder::default(),
        }
    }
}

impl OutputConfig {
    pub const DIR: FieldPath = FieldPath::new("output.dir");

    /// Resolve `dir` against the manifest directory.
    pub fn normalize(&mut self, root: &Path) {
        if self.dir.is_relative() {
            self.dir = root.join(&self.dir);
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.as_os_str().is_empty() {
            diag.error(Self::DIR, "output directory must not be empty");
        } else if self.dir.exists() && !self.dir.is_dir() {
            diag.error(
                Self::DIR,
                format!("`{}` exists and is not a directory", self.dir.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults() {
        let output = OutputConfig::default();
        assert_eq!(output.dir, PathBuf::from("public"));
        assert_eq!(output.write_order, WriteOrder::DeleteThenWrite);
    }

    #[test]
    fn test_output_write_order_spelling() {
        let output: OutputConfig = toml::from_str(r#"write_order = "write-then-delete""#).unwrap();
        assert_eq!(output.write_order, WriteOrder::WriteThenDelete);
        assert!(toml::from_str::<OutputConfig>(r#"write_order = "sideways""#).is_err());
    }

    #[test]
    fn test_output_normalize() {
        let mut output = OutputConfig::default();
        output.normalize(Path::new("/site"));
        assert_eq!(output.dir, PathBuf::from("/site/public"));

        let mut output = OutputConfig {
            dir: "/srv/static".into(),
            ..OutputConfig::default()
        };
        output.normalize(Path::new("/site"));
        assert_eq!(output.dir, PathBuf::from("/srv/static"));
    }
}
