//! Manifest management for `assetpack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [output] and [[bundle]]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # manifest lookup
//! └── mod.rs         # PackConfig (this file)
//! ```
//!
//! Relative paths in the manifest are resolved against the directory that
//! contains it, so builds behave the same from any working directory.

pub mod section;
pub mod types;
mod util;

pub use section::{BundleConfig, OutputConfig, validate_bundles};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::asset::{Compiler, WriteOrder};
use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default manifest file name.
pub const DEFAULT_CONFIG: &str = "assetpack.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetpack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackConfig {
    /// Manifest directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Bundles to compile, in manifest order
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
}

impl PackConfig {
    /// Load, normalize and validate a manifest.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.set_root(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Get the manifest directory
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the manifest directory and resolve relative paths against it.
    pub fn set_root(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.output.normalize(root);
        for bundle in &mut self.bundles {
            bundle.normalize(root);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Override the output directory (relative to the working directory).
    pub fn set_output_dir(&mut self, dir: Option<&Path>) {
        if let Some(dir) = dir {
            self.output.dir = dir.to_path_buf();
        }
    }

    /// Override the write order.
    pub fn set_write_order(&mut self, order: Option<WriteOrder>) {
        Self::update_option(&mut self.output.write_order, order.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Compiler writing into the configured output directory.
    pub fn compiler(&self) -> Compiler<'_> {
        Compiler::new(&self.output.dir).with_order(self.output.write_order)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the manifest.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.output.validate(&mut diag);
        validate_bundles(&self.bundles, &mut diag);
        if self.bundles.is_empty() {
            diag.warn(FieldPath::new("bundle"), "no bundles defined");
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Parses TOML without path normalization or validation.
impl FromStr for PackConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

// ============================================================================
// tests
// ============================================================================
