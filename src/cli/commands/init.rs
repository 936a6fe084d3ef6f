//! Init command implementation

use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use harness_manifest_core::{ManifestConfig, ManifestFormat};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Create a manifest file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path; the extension selects the format")
                .value_name("FILE")
                .default_value("harness-manifest.yaml"),
        )
        .arg(
            clap::Arg::new("empty")
                .short('e')
                .long("empty")
                .help("Create a manifest with four empty lists instead of the tutorial one")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .long("force")
                .help("Overwrite an existing file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("No output path given"))?;
    let empty = matches.get_flag("empty");

    if !matches.get_flag("force") && tokio::fs::try_exists(&output_path).await? {
        return Err(anyhow!(
            "{:?} already exists; use --force to overwrite it",
            output_path
        ));
    }

    let format = ManifestFormat::from_path(&output_path)?;
    info!("Initializing {} manifest: {:?}", format, output_path);

    let manifest = if empty {
        ManifestConfig::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    } else {
        ManifestConfig::tutorial()?
    };

    tokio::fs::write(&output_path, manifest.render(format)?).await?;

    info!("Manifest file created: {:?}", output_path);

    if empty {
        println!("Empty manifest created at {}.", output_path.display());
        println!("Add sub-packages and files to get started.");
    } else {
        println!("Tutorial manifest created at {}.", output_path.display());
        println!("Edit the file to choose which sub-packages and files go into the harness.");
    }

    Ok(())
}
