//! Manifest builds.
//!
//! Bundles compile in manifest order; the first failure aborts the build
//! and leaves earlier bundles in place.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use assetpack::asset::{KindName, WriteOrder};
use assetpack::config::{PackConfig, find_config_file};
use assetpack::logger::ProgressLine;
use assetpack::utils::plural_count;
use assetpack::{debug, log};

/// Locate and load the manifest, then apply CLI overrides.
pub fn load_config(
    config: &Path,
    output: Option<&Path>,
    write_order: Option<WriteOrder>,
) -> Result<PackConfig> {
    let cwd = std::env::current_dir().context("failed to get current working directory")?;
    let Some(path) = find_config_file(&cwd, config) else {
        bail!(
            "manifest `{}` not found in `{}` or any parent directory",
            config.display(),
            cwd.display()
        );
    };
    debug!("build"; "using manifest {}", path.display());

    let mut pack = PackConfig::load(&path)?;
    pack.set_output_dir(output);
    pack.set_write_order(write_order);
    Ok(pack)
}

/// Compile every bundle in `config`, returning the written paths.
pub fn build_bundles(config: &PackConfig, quiet: bool) -> Result<Vec<PathBuf>> {
    let out_dir = &config.output.dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create `{}`", out_dir.display()))?;

    let count = |kind: KindName| config.bundles.iter().filter(|b| b.kind == kind).count();
    let progress = (!quiet).then(|| {
        ProgressLine::new(&[
            ("css", count(KindName::Css)),
            ("js", count(KindName::Js)),
            ("img", count(KindName::Img)),
        ])
    });

    let compiler = config.compiler();
    let mut written = Vec::with_capacity(config.bundles.len());
    for bundle in &config.bundles {
        let kind = bundle.asset_kind();
        let dst = compiler
            .compile(&kind, &bundle.name, &bundle.sources)
            .with_context(|| {
                format!("failed to compile {} bundle `{}`", kind.label(), bundle.name)
            })?;
        debug!("build"; "{} -> {}", bundle.name, dst.display());
        if let Some(progress) = &progress {
            progress.inc(kind.label());
        }
        written.push(dst);
    }

    if let Some(progress) = progress {
        progress.finish();
    }
    if !quiet {
        log!(
            "build";
            "compiled {} into {}",
            plural_count(written.len(), "bundle"),
            out_dir.display()
        );
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetpack::asset::{CSS_EXT, JS_EXT, find_file};
    use assetpack::config::DEFAULT_CONFIG;
    use tempfile::TempDir;

    fn site(manifest: &str) -> (TempDir, PackConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.css"), "body{color:red}").unwrap();
        fs::write(dir.path().join("src/b.css"), "p{color:blue}").unwrap();
        fs::write(dir.path().join("src/app.js"), "start();").unwrap();
        fs::write(dir.path().join("src/logo.png"), [137u8, 80, 78, 71]).unwrap();
        let path = dir.path().join(DEFAULT_CONFIG);
        fs::write(&path, manifest).unwrap();
        let config = PackConfig::load(&path).unwrap();
        (dir, config)
    }

    const MANIFEST: &str = r#"
[output]
dir = "public/assets"

[[bundle]]
name = "app"
kind = "css"
sources = ["src/a.css", "src/b.css"]

[[bundle]]
name = "app"
kind = "js"
sources = ["src/app.js"]

[[bundle]]
name = "logo"
kind = "img"
ext = ".png"
sources = ["src/logo.png"]
"#;

    #[test]
    fn test_build_bundles() {
        let (dir, config) = site(MANIFEST);
        let out = dir.path().join("public/assets");

        let written = build_bundles(&config, true).unwrap();

        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| p.starts_with(&out)));
        let css = find_file(&out, "app", CSS_EXT, false).unwrap();
        assert_eq!(
            fs::read_to_string(css).unwrap(),
            "body{color:red}\n\np{color:blue}\n\n"
        );
        assert!(find_file(&out, "app", JS_EXT, false).is_ok());
        assert!(find_file(&out, "logo", ".png", false).is_ok());
    }

    #[test]
    fn test_rebuild_replaces_changed_bundle() {
        let (dir, config) = site(MANIFEST);
        let out = dir.path().join("public/assets");

        let first = build_bundles(&config, true).unwrap();
        fs::write(dir.path().join("src/app.js"), "restart();").unwrap();
        let second = build_bundles(&config, true).unwrap();

        assert_eq!(first[0], second[0]);
        assert_ne!(first[1], second[1]);
        assert!(!first[1].exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    }

    #[test]
    fn test_build_fails_on_missing_source() {
        let (dir, config) = site(MANIFEST);
        fs::remove_file(dir.path().join("src/app.js")).unwrap();

        let err = build_bundles(&config, true).unwrap_err();
        assert!(err.to_string().contains("failed to compile js bundle `app`"));
    }
}
