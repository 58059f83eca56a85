//! Bundle compilation: concatenate, fingerprint, replace.
//!
//! ```text
//! sources ──combine──▶ buffer ──minify──▶ md5 ──▶ __<name>-<hash><ext>
//!                                                   │
//!                          stale __<name>-*<ext> ◀──┘ removed
//! ```
//!
//! The delete/write sequence is not locked. Two compiles of the same name
//! racing each other can leave zero or two matching files behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::kind::{CSS_EXT, JS_EXT};
use super::{AssetError, AssetKind, AssetResult, matching_files, minify, name};
use crate::debug;
use crate::utils::hash;

/// Separator appended after every source file.
pub const SEPARATOR: &[u8] = b"\n\n";

/// Order of the stale-file cleanup relative to writing the new bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WriteOrder {
    /// Remove every matching file, then write the new one.
    ///
    /// A failed write leaves no compiled file for the name.
    #[default]
    DeleteThenWrite,
    /// Write to a temp file, rename it into place, then remove the others.
    ///
    /// A failed cleanup leaves two matching files, which lookups reject.
    WriteThenDelete,
}

/// Compiles bundles into one output directory.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    out_dir: &'a Path,
    order: WriteOrder,
}

impl<'a> Compiler<'a> {
    pub const fn new(out_dir: &'a Path) -> Self {
        Self {
            out_dir,
            order: WriteOrder::DeleteThenWrite,
        }
    }

    pub const fn with_order(mut self, order: WriteOrder) -> Self {
        self.order = order;
        self
    }

    /// Compile `sources` (in order) into `__<name>-<hash><ext>`.
    ///
    /// Returns the path of the written file.
    pub fn compile<P: AsRef<Path>>(
        &self,
        kind: &AssetKind,
        name: &str,
        sources: &[P],
    ) -> AssetResult<PathBuf> {
        let buf = minify::apply(kind, combine(sources)?);
        let ext = kind.ext();
        let dst = name::output_path(self.out_dir, name, &hash::fingerprint(&buf), ext);

        match self.order {
            WriteOrder::DeleteThenWrite => {
                remove_stale(self.out_dir, name, ext, None)?;
                write_file(&dst, &buf)?;
            }
            WriteOrder::WriteThenDelete => {
                write_atomic(self.out_dir, &dst, &buf)?;
                remove_stale(self.out_dir, name, ext, Some(dst.as_path()))?;
            }
        }

        debug!("compile"; "{} ({} bytes)", dst.display(), buf.len());
        Ok(dst)
    }

    /// Compile a style bundle (`.min.css`).
    pub fn css<P: AsRef<Path>>(&self, name: &str, sources: &[P]) -> AssetResult<PathBuf> {
        self.compile(&AssetKind::Style, name, sources)
    }

    /// Compile a script bundle (`.min.js`).
    pub fn js<P: AsRef<Path>>(&self, name: &str, sources: &[P]) -> AssetResult<PathBuf> {
        self.compile(&AssetKind::Script, name, sources)
    }

    /// Fingerprint a single file (images, favicons) under `ext`.
    pub fn img(&self, name: &str, ext: &str, source: impl AsRef<Path>) -> AssetResult<PathBuf> {
        self.compile(&AssetKind::Image(ext.to_owned()), name, &[source])
    }
}

/// Compile `sources` into `out_dir` under an arbitrary extension.
pub fn compile<P: AsRef<Path>>(
    out_dir: &Path,
    name: &str,
    ext: &str,
    sources: &[P],
) -> AssetResult<PathBuf> {
    let kind = match ext {
        CSS_EXT => AssetKind::Style,
        JS_EXT => AssetKind::Script,
        other => AssetKind::Image(other.to_owned()),
    };
    Compiler::new(out_dir).compile(&kind, name, sources)
}

/// Compile a style bundle into `out_dir`.
pub fn compile_css<P: AsRef<Path>>(
    out_dir: &Path,
    name: &str,
    sources: &[P],
) -> AssetResult<PathBuf> {
    Compiler::new(out_dir).css(name, sources)
}

/// Compile a script bundle into `out_dir`.
pub fn compile_js<P: AsRef<Path>>(
    out_dir: &Path,
    name: &str,
    sources: &[P],
) -> AssetResult<PathBuf> {
    Compiler::new(out_dir).js(name, sources)
}

/// Fingerprint a single image-like file into `out_dir`.
pub fn compile_img(
    out_dir: &Path,
    name: &str,
    ext: &str,
    source: impl AsRef<Path>,
) -> AssetResult<PathBuf> {
    Compiler::new(out_dir).img(name, ext, source)
}

/// Read and concatenate sources, each followed by [`SEPARATOR`].
pub fn combine<P: AsRef<Path>>(sources: &[P]) -> AssetResult<Vec<u8>> {
    let mut buf = Vec::new();
    for path in sources {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        buf.extend_from_slice(&bytes);
        buf.extend_from_slice(SEPARATOR);
    }
    Ok(buf)
}

/// Remove compiled versions of `name`, except `keep` when given.
///
/// Returns the number of files removed.
pub fn remove_stale(dir: &Path, name: &str, ext: &str, keep: Option<&Path>) -> AssetResult<usize> {
    let keep = keep.and_then(Path::file_name);
    let mut removed = 0;
    for file in matching_files(dir, name, ext)? {
        if keep.is_some() && file.file_name() == keep {
            continue;
        }
        fs::remove_file(&file).map_err(|source| AssetError::Remove {
            path: file.clone(),
            source,
        })?;
        debug!("compile"; "removed stale {}", file.display());
        removed += 1;
    }
    Ok(removed)
}

/// Create or truncate `path` with `buf` (`rw-r--r--` on unix).
fn write_file(path: &Path, buf: &[u8]) -> AssetResult<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options
        .open(path)
        .and_then(|mut file| file.write_all(buf))
        .map_err(|source| AssetError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `buf` next to `dst` under a temp name and rename it into place.
///
/// Temp names start with `.tmp`, so they never match a bundle glob.
fn write_atomic(dir: &Path, dst: &Path, buf: &[u8]) -> AssetResult<()> {
    let err = |source| AssetError::Write {
        path: dst.to_path_buf(),
        source,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(err)?;
    tmp.write_all(buf).map_err(err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644)).map_err(err)?;
    }
    tmp.persist(dst).map_err(|e| err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::find_file;
    use tempfile::TempDir;

    fn write_sources(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    fn compiled(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("__"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_compile_css_example() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let sources = write_sources(
            src.path(),
            &[("a.css", "body{color:red}"), ("b.css", "p{color:blue}")],
        );

        let dst = compile_css(out.path(), "app", &sources).unwrap();

        let expected = "body{color:red}\n\np{color:blue}\n\n";
        let hash = hash::fingerprint(expected);
        assert_eq!(fs::read_to_string(&dst).unwrap(), expected);
        assert_eq!(compiled(out.path()), vec![format!("__app-{hash}.min.css")]);
        assert_eq!(dst, out.path().join(format!("__app-{hash}.min.css")));
    }

    #[test]
    fn test_compile_preserves_source_order() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("1.js", "one()"), ("2.js", "two()")]);
        let reversed: Vec<_> = sources.iter().rev().cloned().collect();

        let forward = compile_js(out.path(), "fwd", &sources).unwrap();
        let backward = compile_js(out.path(), "bwd", &reversed).unwrap();

        assert_eq!(fs::read_to_string(forward).unwrap(), "one()\n\ntwo()\n\n");
        assert_eq!(fs::read_to_string(backward).unwrap(), "two()\n\none()\n\n");
    }

    #[test]
    fn test_compile_is_deterministic() {
        let src = TempDir::new().unwrap();
        let out_a = TempDir::new().unwrap();
        let out_b = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("x.js", "let x = 1;")]);

        let a = compile_js(out_a.path(), "app", &sources).unwrap();
        let b = compile_js(out_b.path(), "app", &sources).unwrap();

        assert_eq!(a.file_name(), b.file_name());
    }

    #[test]
    fn test_compile_hash_tracks_content() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("x.css", "a{}")]);

        let first = compile_css(out.path(), "app", &sources).unwrap();
        fs::write(&sources[0], "b{}").unwrap();
        let second = compile_css(out.path(), "app", &sources).unwrap();

        assert_ne!(first.file_name(), second.file_name());
        assert!(!first.exists());
        assert!(second.exists());
        assert_eq!(compiled(out.path()).len(), 1);
    }

    #[test]
    fn test_compile_removes_every_stale_version() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("__app-old1.min.css"), "old").unwrap();
        fs::write(out.path().join("__app-old2.min.css"), "old").unwrap();
        fs::write(out.path().join("__app-keep.min.js"), "other ext").unwrap();
        fs::write(out.path().join("__vendor-keep.min.css"), "other name").unwrap();
        let sources = write_sources(src.path(), &[("x.css", "new")]);

        let dst = compile_css(out.path(), "app", &sources).unwrap();

        let hash = hash::fingerprint("new\n\n");
        assert_eq!(
            compiled(out.path()),
            vec![
                format!("__app-{hash}.min.css"),
                "__app-keep.min.js".to_string(),
                "__vendor-keep.min.css".to_string(),
            ]
        );
        assert_eq!(find_file(out.path(), "app", ".min.css", false).unwrap(), dst);
    }

    #[test]
    fn test_compile_read_error_leaves_output_untouched() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("__app-old.min.css"), "old").unwrap();
        let mut sources = write_sources(src.path(), &[("x.css", "a{}")]);
        sources.push(src.path().join("missing.css"));

        let err = compile_css(out.path(), "app", &sources).unwrap_err();

        match err {
            AssetError::Read { path, .. } => assert!(path.ends_with("missing.css")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(compiled(out.path()), vec!["__app-old.min.css".to_string()]);
    }

    #[test]
    fn test_compile_write_error_surfaces() {
        let src = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("x.css", "a{}")]);
        let missing_out = src.path().join("does-not-exist");

        let err = compile_css(&missing_out, "app", &sources).unwrap_err();
        assert!(matches!(err, AssetError::Write { .. }));
    }

    #[test]
    fn test_compile_img_uses_given_ext() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let icon = src.path().join("favicon.ico");
        fs::write(&icon, [0u8, 1, 2, 3]).unwrap();

        let dst = compile_img(out.path(), "favicon", ".ico", &icon).unwrap();

        let mut expected = vec![0u8, 1, 2, 3];
        expected.extend_from_slice(SEPARATOR);
        assert_eq!(fs::read(&dst).unwrap(), expected);
        assert_eq!(
            dst.file_name().unwrap().to_string_lossy(),
            format!("__favicon-{}.ico", hash::fingerprint(&expected))
        );
    }

    #[test]
    fn test_compile_generic_ext_maps_kind() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("a.js", "a()")]);

        let via_ext = compile(out.path(), "app", ".min.js", &sources).unwrap();
        assert!(via_ext.to_string_lossy().ends_with(".min.js"));
        assert_eq!(compiled(out.path()).len(), 1);
    }

    #[test]
    fn test_write_then_delete_replaces_stale() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("__app-old.min.js"), "old").unwrap();
        let sources = write_sources(src.path(), &[("a.js", "a()")]);

        let compiler = Compiler::new(out.path()).with_order(WriteOrder::WriteThenDelete);
        let dst = compiler.js("app", &sources).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "a()\n\n");
        assert_eq!(compiled(out.path()).len(), 1);
        // no temp files left behind
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_then_delete_same_content_keeps_file() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("a.css", "a{}")]);
        let compiler = Compiler::new(out.path()).with_order(WriteOrder::WriteThenDelete);

        let first = compiler.css("app", &sources).unwrap();
        let second = compiler.css("app", &sources).unwrap();

        assert_eq!(first, second);
        assert!(second.exists());
        assert_eq!(compiled(out.path()).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_compiled_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let sources = write_sources(src.path(), &[("a.css", "a{}")]);

        for order in [WriteOrder::DeleteThenWrite, WriteOrder::WriteThenDelete] {
            let dst = Compiler::new(out.path()).with_order(order).css("app", &sources).unwrap();
            let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
            // umask may only clear bits
            assert_eq!(mode & !0o644, 0, "{order:?}");
            assert_ne!(mode & 0o600, 0, "{order:?}");
        }
    }

    #[test]
    fn test_remove_stale_counts() {
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("__app-1.png"), "1").unwrap();
        fs::write(out.path().join("__app-2.png"), "2").unwrap();

        let keep = out.path().join("__app-2.png");
        let removed = remove_stale(out.path(), "app", ".png", Some(keep.as_path())).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(compiled(out.path()), vec!["__app-2.png".to_string()]);
    }
}
