//! `[[bundle]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[bundle]]
//! name = "app"
//! kind = "css"
//! sources = ["css/reset.css", "css/app.css"]
//!
//! [[bundle]]
//! name = "favicon"
//! kind = "img"
//! ext = ".ico"
//! sources = ["img/favicon.ico"]
//! ```

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetKind, CSS_EXT, JS_EXT, KindName};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Logical name; compiled as `__<name>-<hash><ext>`.
    pub name: String,
    /// `css`, `js` or `img`.
    pub kind: KindName,
    /// Source files, concatenated in order.
    pub sources: Vec<PathBuf>,
    /// Extension for `img` bundles, including the leading dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
}

impl BundleConfig {
    pub const NAME: FieldPath = FieldPath::new("bundle.name");
    pub const SOURCES: FieldPath = FieldPath::new("bundle.sources");
    pub const EXT: FieldPath = FieldPath::new("bundle.ext");

    /// Kind with its resolved output extension.
    pub fn asset_kind(&self) -> AssetKind {
        match self.kind {
            KindName::Css => AssetKind::Style,
            KindName::Js => AssetKind::Script,
            KindName::Img => AssetKind::Image(self.ext.clone().unwrap_or_default()),
        }
    }

    /// Extension of the compiled file, if it is well-formed.
    fn output_ext(&self) -> Option<&str> {
        match self.kind {
            KindName::Css => Some(CSS_EXT),
            KindName::Js => Some(JS_EXT),
            KindName::Img => self.ext.as_deref().filter(|ext| ext.starts_with('.')),
        }
    }

    /// Whether the lookup glob `__<name>-*<ext>` also matches `other`'s output.
    ///
    /// Hashes are hex and extensions start with `.`, so the glob matches
    /// when `other`'s name is this name or this name plus `-...`, and
    /// `other`'s extension ends with this one.
    fn shadows(&self, other: &Self) -> bool {
        let (Some(ext), Some(other_ext)) = (self.output_ext(), other.output_ext()) else {
            return false;
        };
        if self.name.is_empty() || !other_ext.ends_with(ext) {
            return false;
        }
        other.name == self.name
            || other
                .name
                .strip_prefix(&self.name)
                .is_some_and(|rest| rest.starts_with('-'))
    }

    /// Resolve relative sources against the manifest directory.
    pub fn normalize(&mut self, root: &Path) {
        for source in &mut self.sources {
            if source.is_relative() {
                *source = root.join(&*source);
            }
        }
    }

    /// Validate one entry; `idx` is its position in the manifest.
    pub fn validate(&self, idx: usize, diag: &mut ConfigDiagnostics) {
        if self.name.is_empty() {
            diag.error(Self::NAME, format!("[{idx}] name must not be empty"));
        } else if self.name.contains(['/', '\\']) {
            diag.error_with_hint(
                Self::NAME,
                format!("[{idx}] name `{}` contains a path separator", self.name),
                "set `output.dir` to choose where bundles are written",
            );
        }

        match self.kind {
            KindName::Img => self.validate_img(idx, diag),
            KindName::Css | KindName::Js => {
                if self.ext.is_some() {
                    diag.error_with_hint(
                        Self::EXT,
                        format!("[{idx}] `{}` bundles use a fixed extension", self.kind.as_str()),
                        "remove `ext`, or use kind = \"img\"",
                    );
                }
                if self.sources.is_empty() {
                    diag.error(Self::SOURCES, format!("[{idx}] at least one source is required"));
                }
            }
        }

        for source in &self.sources {
            if !source.is_file() {
                diag.error(
                    Self::SOURCES,
                    format!("[{idx}] source `{}` not found", source.display()),
                );
            }
        }
    }

    fn validate_img(&self, idx: usize, diag: &mut ConfigDiagnostics) {
        match self.ext.as_deref() {
            None | Some("") => diag.error_with_hint(
                Self::EXT,
                format!("[{idx}] img bundles need an extension"),
                "e.g. ext = \".png\"",
            ),
            Some(ext) if !ext.starts_with('.') => diag.error_with_hint(
                Self::EXT,
                format!("[{idx}] extension `{ext}` must start with `.`"),
                format!("ext = \".{ext}\""),
            ),
            Some(_) => {}
        }
        if self.sources.len() != 1 {
            diag.error(
                Self::SOURCES,
                format!(
                    "[{idx}] img bundles take exactly one source, found {}",
                    self.sources.len()
                ),
            );
        }
    }
}

/// Validate every bundle and reject bundles whose compiled files collide.
///
/// Two bundles collide when one's lookup glob matches the other's output:
/// compiling one would delete the other, and lookups would be ambiguous.
pub fn validate_bundles(bundles: &[BundleConfig], diag: &mut ConfigDiagnostics) {
    let mut seen: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    for (idx, bundle) in bundles.iter().enumerate() {
        bundle.validate(idx, diag);
        let Some(ext) = bundle.output_ext() else {
            continue;
        };
        if let Some(prev) = seen.insert((bundle.name.as_str(), ext), idx) {
            diag.error(
                BundleConfig::NAME,
                format!("[{idx}] bundle `{}{ext}` already defined at [{prev}]", bundle.name),
            );
            continue;
        }

        for (prev, other) in bundles[..idx].iter().enumerate() {
            if other.name == bundle.name && other.output_ext() == Some(ext) {
                continue;
            }
            let owner = if other.shadows(bundle) {
                other
            } else if bundle.shadows(other) {
                bundle
            } else {
                continue;
            };
            diag.error_with_hint(
                BundleConfig::NAME,
                format!(
                    "[{idx}] `{}` overlaps [{prev}] `{}`: lookups for `{}` match both outputs",
                    bundle.name, other.name, owner.name
                ),
                "rename one bundle so its name is not the other's name followed by `-`",
            );
        }
    }
}
