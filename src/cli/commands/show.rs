//! Show command implementation

use crate::cli::utils::{self, OutputFormat};
use anyhow::Result;
use clap::{ArgMatches, Command};
use harness_manifest_core::{ManifestConfig, ManifestList};
use serde::Serialize;

pub fn command() -> Command {
    Command::new("show")
        .about("Show manifest lists, or what the manifest selects for one sub-package")
        .arg(utils::config_arg())
        .arg(utils::format_arg())
        .arg(
            clap::Arg::new("package")
                .short('p')
                .long("package")
                .help("Sub-package to look up")
                .value_name("NAME"),
        )
}

/// How a sub-package is included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inclusion {
    Full,
    Partial,
    Excluded,
}

/// Manifest projections for a single sub-package
#[derive(Debug, Clone, Serialize)]
pub struct PackageView<'a> {
    pub package: &'a str,
    pub inclusion: Inclusion,
    pub full_files: Vec<&'a str>,
    pub strip_files: Vec<&'a str>,
}

impl<'a> PackageView<'a> {
    pub fn new(manifest: &'a ManifestConfig, package: &'a str) -> Self {
        let inclusion = if manifest.is_full_package(package) {
            Inclusion::Full
        } else if manifest.is_partial_package(package) {
            Inclusion::Partial
        } else {
            Inclusion::Excluded
        };

        Self {
            package,
            inclusion,
            full_files: manifest.full_files_of(package),
            strip_files: manifest.strip_files_of(package),
        }
    }
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let manifest = utils::load_manifest(matches).await?;
    let format = utils::get_output_format(matches);

    match matches.get_one::<String>("package") {
        Some(package) => {
            let view = PackageView::new(&manifest, package);
            if format == OutputFormat::Text {
                print_package(&view);
            } else {
                utils::print_structured(&view, format)?;
            }
        }
        None if format == OutputFormat::Text => print_manifest(&manifest),
        None => utils::print_structured(&manifest, format)?,
    }

    Ok(())
}

fn print_manifest(manifest: &ManifestConfig) {
    for list in [
        ManifestList::FullPackages,
        ManifestList::PartialPackages,
        ManifestList::FullFiles,
        ManifestList::StripFiles,
    ] {
        let entries = manifest.list(list);
        println!("{} ({}):", list, entries.len());
        for entry in entries {
            println!("  - {entry}");
        }
    }
    println!("Fingerprint: {}", manifest.fingerprint());
}

fn print_package(view: &PackageView<'_>) {
    println!("Package: {}", view.package);
    let inclusion = match view.inclusion {
        Inclusion::Full => "full",
        Inclusion::Partial => "partial",
        Inclusion::Excluded => "not included",
    };
    println!("Inclusion: {inclusion}");

    if !view.full_files.is_empty() {
        println!("Full files:");
        for file in &view.full_files {
            println!("  - {file}");
        }
    }
    if !view.strip_files.is_empty() {
        println!("Strip files:");
        for file in &view.strip_files {
            println!("  - {file}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_view() {
        let manifest = ManifestConfig::tutorial().unwrap();

        let sorter = PackageView::new(&manifest, "ex-sorter");
        assert_eq!(sorter.inclusion, Inclusion::Partial);
        assert_eq!(sorter.full_files.len(), 7);
        assert_eq!(sorter.strip_files.len(), 4);

        let vc = PackageView::new(&manifest, "vc");
        assert_eq!(vc.inclusion, Inclusion::Full);
        assert!(vc.full_files.is_empty());

        assert_eq!(
            PackageView::new(&manifest, "ex-regincr").inclusion,
            Inclusion::Excluded
        );
    }
}
