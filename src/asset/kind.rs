//! Asset kind definitions.

use serde::{Deserialize, Serialize};

/// Extension written for style bundles.
pub const CSS_EXT: &str = ".min.css";
/// Extension written for script bundles.
pub const JS_EXT: &str = ".min.js";

/// Kind of compiled bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Concatenated stylesheets, written as `.min.css`.
    Style,
    /// Concatenated scripts, written as `.min.js`.
    Script,
    /// A single file with a caller-chosen extension (images, favicons).
    Image(String),
}

impl AssetKind {
    /// Extension of the compiled file, including the leading dot.
    pub fn ext(&self) -> &str {
        match self {
            Self::Style => CSS_EXT,
            Self::Script => JS_EXT,
            Self::Image(ext) => ext,
        }
    }

    /// Short label used in logs and progress counters.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Style => "css",
            Self::Script => "js",
            Self::Image(_) => "img",
        }
    }
}

/// Manifest spelling of an asset kind (`kind = "css"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindName {
    Css,
    Js,
    Img,
}

impl KindName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
            Self::Img => "img",
        }
    }
}

/// Template family selected from an extension suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Style,
    Script,
}

impl Markup {
    /// Pick the template family for `ext`, if any.
    pub fn from_ext(ext: &str) -> Option<Self> {
        if ext.ends_with("css") {
            Some(Self::Style)
        } else if ext.ends_with("js") {
            Some(Self::Script)
        } else {
            None
        }
    }
}
