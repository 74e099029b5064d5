use crate::changes::changed_files_from_env;
use crate::chat::ChatClient;
use crate::load_config::{default_config_path, load_config};
use crate::process::process_all;
use crate::report::{report_processed, GITHUB_OUTPUT_VAR};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Sends changed markdown files to a chat-completion model and writes
/// `<stem>_processed.md` next to each one.
///
/// Inputs come from the environment: `CHANGED_FILES`, `GITHUB_TOKEN`, `GITHUB_OUTPUT`.
#[derive(Parser, Debug)]
#[clap(
    name = "ai-processor",
    version,
    about = "Process changed markdown files with a chat-completion model"
)]
pub struct Cli {
    /// Path to the JSON settings file (defaults to config.json next to the binary)
    #[clap(long, env = "AI_PROCESSOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Chat-completion URL to post to instead of the GitHub Models endpoint
    #[clap(long, env = "AI_PROCESSOR_ENDPOINT")]
    pub endpoint: Option<String>,
}

/// Async entrypoint shared by main() and the integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("Starting AI content processing");

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = load_config(&config_path)?;

    let changed_files = changed_files_from_env();
    if changed_files.is_empty() {
        tracing::info!("No changed files found");
        return Ok(());
    }

    let mut client = ChatClient::new_from_env().context("Cannot process files")?;
    if let Some(endpoint) = cli.endpoint {
        tracing::info!(endpoint = %endpoint, "Using endpoint override");
        client = client.with_endpoint(endpoint);
    }
    let report = process_all(&changed_files, &config, &client).await;

    let channel = std::env::var_os(GITHUB_OUTPUT_VAR).map(PathBuf::from);
    report_processed(channel.as_deref(), &report.processed_outputs())
        .with_context(|| format!("Failed to write results to {GITHUB_OUTPUT_VAR}"))?;

    Ok(())
}
