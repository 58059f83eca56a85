//! Path utilities.

use std::path::{Component, Path, PathBuf};

/// Lexically clean a path (drop `.`, fold `..`) without touching the filesystem.
///
/// A leading `..` that cannot be folded is kept for relative paths and
/// dropped for rooted ones (`/../a` → `/a`).
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Render a path as a root-anchored URL path (`public/x.css` → `/public/x.css`).
///
/// Separators are always `/`, regardless of platform.
pub fn url_path(path: &Path) -> String {
    let parts: Vec<_> = clean(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("/{}", parts.join("/"))
}
