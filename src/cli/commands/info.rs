//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};
use harness_manifest_core::LIST_NAMES;

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("harness-manifest - Tutorial harness manifest tool");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    if detailed {
        println!("\nManifest lists:");
        for name in LIST_NAMES {
            println!("  - {name}");
        }
        println!("\nFormats:");
        println!("  - YAML (.yaml, .yml)");
        println!("  - JSON (.json)");
        println!("  - Assignment literal (.py, .cfg)");
        println!("\nChecks:");
        println!("  - DuplicatePackage: package repeated, or both full and partial");
        println!("  - DuplicateFile: file repeated, or both full and strip file");
        println!("  - OrphanFileReference: file of a package that is not partial");
    }

    Ok(())
}
