//! Command-line interface module.

mod args;
pub mod build;
pub mod lookup;

pub use args::{Cli, Commands, LookupArgs, OutputArgs};

use anyhow::{Context, Result};
use std::path::PathBuf;

use assetpack::asset::{AssetKind, Compiler};

/// Ad-hoc compile for the `css`, `js` and `img` subcommands.
pub fn compile(
    kind: &AssetKind,
    name: &str,
    sources: &[PathBuf],
    out: &OutputArgs,
) -> Result<PathBuf> {
    Compiler::new(&out.output)
        .with_order(out.write_order)
        .compile(kind, name, sources)
        .with_context(|| format!("failed to compile {} bundle `{name}`", kind.label()))
}
