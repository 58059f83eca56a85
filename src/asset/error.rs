//! Asset compile and lookup errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors raised while compiling, resolving or rendering a bundle.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove stale file `{}`", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to list matching files")]
    Glob(#[from] glob::GlobError),

    #[error("no files found at {} with name {name}", .dir.display())]
    NotFound { dir: PathBuf, name: String },

    #[error("more than one file found at {} with name {name} ({count} matches)", .dir.display())]
    Ambiguous {
        dir: PathBuf,
        name: String,
        count: usize,
    },

    #[error("no {mode} template for ext {ext}")]
    NoTemplate { mode: &'static str, ext: String },

    #[error("helper `{helper}` requires an extension argument")]
    MissingExtension { helper: &'static str },
}

impl AssetError {
    /// Whether this is a lookup cardinality failure (none or several matches).
    pub const fn is_cardinality(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}
