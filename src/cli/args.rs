//! Command-line interface definitions.

use assetpack::asset::{Helper, WriteOrder};
use assetpack::config::DEFAULT_CONFIG;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Bundle css/js/image sources into content-hashed files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile every bundle listed in the manifest
    #[command(visible_alias = "b")]
    Build {
        /// Manifest path (searched upward from the current directory)
        #[arg(
            short = 'C',
            long,
            default_value = DEFAULT_CONFIG,
            value_hint = clap::ValueHint::FilePath
        )]
        config: PathBuf,

        /// Output directory, overriding `output.dir`
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Stale cleanup order, overriding `output.write_order`
        #[arg(short, long, value_enum)]
        write_order: Option<WriteOrder>,
    },

    /// Concatenate stylesheets into `__<name>-<hash>.min.css`
    Css {
        /// Logical bundle name
        name: String,

        /// Source files, concatenated in order
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        sources: Vec<PathBuf>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Concatenate scripts into `__<name>-<hash>.min.js`
    Js {
        /// Logical bundle name
        name: String,

        /// Source files, concatenated in order
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        sources: Vec<PathBuf>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Fingerprint a single file (image, favicon) as `__<name>-<hash><ext>`
    Img {
        /// Logical bundle name
        name: String,

        /// Output extension, including the leading dot (e.g. `.png`)
        ext: String,

        /// Source file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        source: PathBuf,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Print the path of the single compiled file for a bundle
    #[command(visible_alias = "f")]
    Find {
        /// Logical bundle name
        name: String,

        /// Extension of the compiled file (e.g. `.min.css`)
        ext: String,

        #[command(flatten)]
        lookup: LookupArgs,

        /// Print the path rooted at `/` (URL form)
        #[arg(short, long)]
        absolute: bool,
    },

    /// Run a template helper (cssTag, cssInline, jsTag, jsInline, imgPath)
    #[command(visible_alias = "r")]
    Render {
        /// Helper name
        #[arg(value_parser = parse_helper)]
        helper: Helper,

        /// Logical bundle name
        name: String,

        /// Extension (imgPath only)
        ext: Option<String>,

        #[command(flatten)]
        lookup: LookupArgs,
    },
}

/// Where ad-hoc compiles write, and how they replace stale files.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub output: PathBuf,

    /// Stale cleanup order
    #[arg(short, long, value_enum, default_value_t)]
    pub write_order: WriteOrder,
}

/// Directory compiled files are looked up in.
#[derive(clap::Args, Debug, Clone)]
pub struct LookupArgs {
    /// Directory holding compiled bundles
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,
}

fn parse_helper(s: &str) -> Result<Helper, String> {
    Helper::from_name(s).ok_or_else(|| {
        let names: Vec<_> = Helper::ALL.iter().map(|h| h.name()).collect();
        format!("unknown helper `{s}` (expected one of: {})", names.join(", "))
    })
}
