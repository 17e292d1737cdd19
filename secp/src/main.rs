#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod app;
mod args;
mod output;

use std::process::ExitCode;

use app::App;
use args::Args;
use clap::Parser;
use secp_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    secp_telemetry::init(&config.telemetry)?;

    tracing::debug!(
        config_path = %args.config.display(),
        base_url = %config.client.base_url,
        "starting secp"
    );

    let app = App::from_config(&config)?;

    app.run(args.command).await
}
