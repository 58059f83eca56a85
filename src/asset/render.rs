//! HTML fragments referencing compiled bundles.
//!
//! Paths and contents are substituted verbatim; both come from build output
//! the operator controls, so nothing is escaped.

use std::fs;
use std::path::Path;

use super::kind::{CSS_EXT, JS_EXT, Markup};
use super::{AssetError, AssetResult, find_file};

/// Render a `<link>`/`<script src>` tag for `path`.
pub fn tag_html(markup: Markup, path: &str) -> String {
    match markup {
        Markup::Style => format!(r#"<link href="{path}" rel="stylesheet" type="text/css" />"#),
        Markup::Script => format!(r#"<script src="{path}" type="text/javascript" ></script>"#),
    }
}

/// Render a `<style>`/`<script>` block around `content`.
pub fn inline_html(markup: Markup, content: &str) -> String {
    match markup {
        Markup::Style => format!("<style>{content}</style>"),
        Markup::Script => format!("<script>{content}</script>"),
    }
}

fn markup_for(mode: &'static str, ext: &str) -> AssetResult<Markup> {
    Markup::from_ext(ext).ok_or_else(|| AssetError::NoTemplate {
        mode,
        ext: ext.to_owned(),
    })
}

/// Tag referencing the compiled file by its root-anchored path.
pub fn tag(dir: &Path, name: &str, ext: &str) -> AssetResult<String> {
    let markup = markup_for("tag", ext)?;
    let file = find_file(dir, name, ext, true)?;
    Ok(tag_html(markup, &file.to_string_lossy()))
}

/// Compiled file contents wrapped in an inline block.
pub fn inline(dir: &Path, name: &str, ext: &str) -> AssetResult<String> {
    let markup = markup_for("inline", ext)?;
    let file = find_file(dir, name, ext, false)?;
    let bytes = fs::read(&file).map_err(|source| AssetError::Read { path: file, source })?;
    Ok(inline_html(markup, &String::from_utf8_lossy(&bytes)))
}

pub fn css_tag(dir: &Path, name: &str) -> AssetResult<String> {
    tag(dir, name, CSS_EXT)
}

pub fn js_tag(dir: &Path, name: &str) -> AssetResult<String> {
    tag(dir, name, JS_EXT)
}

pub fn css_inline(dir: &Path, name: &str) -> AssetResult<String> {
    inline(dir, name, CSS_EXT)
}

pub fn js_inline(dir: &Path, name: &str) -> AssetResult<String> {
    inline(dir, name, JS_EXT)
}
