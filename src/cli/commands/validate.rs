//! Validate command implementation

use crate::cli::utils::{self, OutputFormat};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate a manifest file")
        .arg(utils::config_arg())
        .arg(utils::format_arg())
        .arg(
            clap::Arg::new("warn-only")
                .short('w')
                .long("warn-only")
                .help("Report violations without failing")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating manifest file");

    let manifest = utils::load_manifest(matches).await?;
    let report = manifest.validate();
    let format = utils::get_output_format(matches);

    if format == OutputFormat::Text {
        if report.is_valid() {
            println!("Manifest is valid!");
            println!("Full packages: {}", manifest.full_packages().len());
            println!("Partial packages: {}", manifest.partial_packages().len());
            println!("Full files: {}", manifest.full_files().len());
            println!("Strip files: {}", manifest.strip_files().len());
        } else {
            println!("Manifest has {} violation(s):", report.len());
            for violation in &report {
                println!("  - {violation}");
            }
        }
    } else {
        utils::print_structured(&report, format)?;
    }

    if report.is_valid() {
        Ok(())
    } else if matches.get_flag("warn-only") {
        warn!("Ignoring {} manifest violation(s)", report.len());
        Ok(())
    } else {
        Err(anyhow!("Manifest has {} violation(s)", report.len()))
    }
}
