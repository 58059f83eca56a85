//! assetpack - bundle css/js/image sources into content-hashed files.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

use assetpack::asset::AssetKind;
use assetpack::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Build {
            config,
            output,
            write_order,
        } => {
            let config = cli::build::load_config(config, output.as_deref(), *write_order)?;
            cli::build::build_bundles(&config, false).map(|_| ())
        }
        Commands::Css { name, sources, out } => {
            print_path(cli::compile(&AssetKind::Style, name, sources, out)?)
        }
        Commands::Js { name, sources, out } => {
            print_path(cli::compile(&AssetKind::Script, name, sources, out)?)
        }
        Commands::Img {
            name,
            ext,
            source,
            out,
        } => {
            let kind = AssetKind::Image(ext.clone());
            print_path(cli::compile(&kind, name, std::slice::from_ref(source), out)?)
        }
        Commands::Find {
            name,
            ext,
            lookup,
            absolute,
        } => {
            println!("{}", cli::lookup::find(&lookup.dir, name, ext, *absolute)?);
            Ok(())
        }
        Commands::Render {
            helper,
            name,
            ext,
            lookup,
        } => {
            println!(
                "{}",
                cli::lookup::render(*helper, &lookup.dir, name, ext.as_deref())?
            );
            Ok(())
        }
    }
}

fn print_path(path: std::path::PathBuf) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}
