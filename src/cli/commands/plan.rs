//! Plan command implementation

use crate::cli::utils::{self, OutputFormat};
use crate::plan::HarnessPlan;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("plan")
        .about("List the files a manifest selects from a source tree, without copying")
        .arg(utils::config_arg())
        .arg(utils::format_arg())
        .arg(
            clap::Arg::new("source")
                .short('s')
                .long("source")
                .help("Root of the source tree")
                .value_name("DIR")
                .required(true),
        )
        .arg(
            clap::Arg::new("strict")
                .long("strict")
                .help("Fail when the manifest has violations or names missing paths")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let source = matches
        .get_one::<String>("source")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("No source directory given"))?;
    let strict = matches.get_flag("strict");

    let manifest = utils::load_manifest(matches).await?;

    let report = manifest.validate();
    for violation in &report {
        warn!("{}", violation);
    }
    if strict && !report.is_valid() {
        return Err(anyhow!("Manifest has {} violation(s)", report.len()));
    }

    info!("Resolving manifest against {:?}", source);
    let plan = HarnessPlan::resolve(&manifest, &source)?;

    match utils::get_output_format(matches) {
        OutputFormat::Text => {
            print!("{plan}");
            println!(
                "{} to copy, {} to strip, {} missing, {} invalid",
                plan.copies().count(),
                plan.strips().count(),
                plan.missing.len(),
                plan.invalid.len()
            );
        }
        format => utils::print_structured(&plan, format)?,
    }

    if strict && !plan.is_complete() {
        return Err(anyhow!(
            "{} path(s) named by the manifest are missing and {} are invalid",
            plan.missing.len(),
            plan.invalid.len()
        ));
    }

    Ok(())
}
