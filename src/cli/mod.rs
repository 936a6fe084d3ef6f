//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("harness-manifest")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Load, validate and resolve tutorial harness manifests")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::show::command())
            .subcommand(commands::plan::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("show", sub_matches)) => commands::show::run(sub_matches).await,
            Some(("plan", sub_matches)) => commands::plan::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Context, Result};
    use clap::{Arg, ArgMatches};
    use harness_manifest_core::{ManifestConfig, ManifestFormat};
    use std::path::PathBuf;
    use tracing::debug;

    /// Manifest files looked up in the working directory, in order
    pub const DEFAULT_MANIFEST_PATHS: [&str; 4] = [
        "harness-manifest.yaml",
        "harness-manifest.yml",
        "harness-manifest.json",
        "tutorial-gen-harness-cfg.py",
    ];

    /// How a command prints structured results
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum OutputFormat {
        Text,
        Json,
        Yaml,
    }

    /// `--config` argument shared by commands that read a manifest
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Manifest file path")
            .value_name("FILE")
    }

    /// `--format` argument shared by commands with structured output
    pub fn format_arg() -> Arg {
        Arg::new("format")
            .short('f')
            .long("format")
            .help("Output format")
            .value_parser(["text", "json", "yaml"])
            .default_value("text")
    }

    /// Get the output format from arguments
    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            Some("yaml") => OutputFormat::Yaml,
            _ => OutputFormat::Text,
        }
    }

    /// Get manifest path from arguments or look for a default one
    pub fn get_manifest_path(matches: &ArgMatches) -> Result<PathBuf> {
        if let Some(path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(path));
        }

        DEFAULT_MANIFEST_PATHS
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .ok_or_else(|| {
                anyhow!("No manifest file found. Use --config to specify a file or create one with 'harness-manifest init'")
            })
    }

    /// Load the manifest named by the arguments
    pub async fn load_manifest(matches: &ArgMatches) -> Result<ManifestConfig> {
        let path = get_manifest_path(matches)?;
        let format = ManifestFormat::from_path(&path)?;
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read manifest {:?}", path))?;

        let manifest =
            ManifestConfig::parse_with_origin(&content, format, &path.display().to_string())?;
        debug!("Manifest {:?} has fingerprint {}", path, manifest.fingerprint());

        Ok(manifest)
    }

    /// Print a serializable value as JSON or YAML
    pub fn print_structured<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
            OutputFormat::Text => return Err(anyhow!("Text output has no structured form")),
        }
        Ok(())
    }
}
