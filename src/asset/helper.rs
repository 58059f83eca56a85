//! Template helper registry.
//!
//! Fixed name → function mapping handed to a page-templating layer:
//!
//! | Name        | Arguments             | Returns                    |
//! |-------------|-----------------------|----------------------------|
//! | `cssTag`    | `dir, name`           | `<link ...>`               |
//! | `cssInline` | `dir, name`           | `<style>...</style>`       |
//! | `jsTag`     | `dir, name`           | `<script src=...>`         |
//! | `jsInline`  | `dir, name`           | `<script>...</script>`     |
//! | `imgPath`   | `dir, name, ext`      | `/dir/__name-hash.ext`     |

use std::fmt;
use std::path::Path;

use super::{AssetError, AssetResult, img_path, render};

/// A named template helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    CssTag,
    CssInline,
    JsTag,
    JsInline,
    ImgPath,
}

impl Helper {
    /// Every registered helper.
    pub const ALL: [Self; 5] = [
        Self::CssTag,
        Self::CssInline,
        Self::JsTag,
        Self::JsInline,
        Self::ImgPath,
    ];

    /// Name under which the helper is exposed to templates.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CssTag => "cssTag",
            Self::CssInline => "cssInline",
            Self::JsTag => "jsTag",
            Self::JsInline => "jsInline",
            Self::ImgPath => "imgPath",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    /// Whether the helper takes an extension argument.
    pub const fn takes_ext(self) -> bool {
        matches!(self, Self::ImgPath)
    }

    /// Invoke the helper. `ext` is only read by `imgPath`.
    pub fn call(self, dir: &Path, name: &str, ext: Option<&str>) -> AssetResult<String> {
        match self {
            Self::CssTag => render::css_tag(dir, name),
            Self::CssInline => render::css_inline(dir, name),
            Self::JsTag => render::js_tag(dir, name),
            Self::JsInline => render::js_inline(dir, name),
            Self::ImgPath => {
                let ext = ext.ok_or(AssetError::MissingExtension {
                    helper: self.name(),
                })?;
                img_path(dir, name, ext)
            }
        }
    }
}

impl fmt::Display for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
