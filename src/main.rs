//! Harness manifest CLI binary

use anyhow::Result;

use harness_manifest::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harness_manifest=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let matches = CliApp::app().get_matches();

    // Run the CLI application
    CliApp::run(&matches).await
}
