mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use curator_engine::RemoteClient;
use curator_logging::{curator_info, curator_warn, LogDestination};
use log::LevelFilter;

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match config::load_config(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (config::CuratorConfig::default(), Some(err)),
    };

    let destination = if config.log_to_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    curator_logging::initialize(destination, level, None);
    if let Some(err) = config_error {
        curator_warn!("{}; falling back to defaults", err);
    }

    let settings = config::client_settings(cli.server.as_deref(), &config);
    curator_info!("Using server {}", settings.server_url());
    let client = RemoteClient::new(settings)?;

    match &cli.command {
        Commands::Tags(args) => commands::tags(&client, &args.command).await,
        Commands::Content(args) => commands::content(&client, args).await,
    }
}
