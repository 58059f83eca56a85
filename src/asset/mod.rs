//! Bundle compilation, lookup and rendering.
//!
//! Compiled files are named `__<name>-<md5 hex><ext>`; one exists per
//! (output dir, name, ext) after a successful compile.

mod compile;
mod error;
mod helper;
mod kind;
pub mod minify;
pub mod name;
pub mod render;
mod resolve;

// Types
pub use error::{AssetError, AssetResult};
pub use helper::Helper;
pub use kind::{AssetKind, CSS_EXT, JS_EXT, KindName, Markup};

// Compiling (side effects)
pub use compile::{
    Compiler, SEPARATOR, WriteOrder, combine, compile, compile_css, compile_img, compile_js,
    remove_stale,
};

// Lookup
pub use resolve::{find_file, img_path, matching_files};

// Rendering
pub use render::{css_inline, css_tag, inline, js_inline, js_tag, tag};
