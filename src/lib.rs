//! Content-hashed asset bundles.
//!
//! Sources are concatenated, hashed and written as `__<name>-<md5><ext>`;
//! the previous file for the same name is removed. Templates reference the
//! result through [`asset::Helper`] (`cssTag`, `cssInline`, `jsTag`,
//! `jsInline`, `imgPath`).
//!
//! ```ignore
//! use assetpack::asset;
//!
//! asset::compile_css(Path::new("public"), "app", &["reset.css", "app.css"])?;
//! let link = asset::css_tag(Path::new("public"), "app")?;
//! // <link href="/public/__app-<md5>.min.css" rel="stylesheet" type="text/css" />
//! ```

pub mod asset;
pub mod config;
pub mod logger;
pub mod utils;
