//! VoxRelay CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voxrelay::cli::{
    app::{load_merged_config, run_relay, run_servers, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voxrelay::domain::error::ConfigError;
use voxrelay::infrastructure::XdgConfigStore;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "voxrelay=debug" } else { "voxrelay=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();
    let cli_config = cli.to_config();

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e @ ConfigError::ValidationError { .. }) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_USAGE_ERROR)
                }
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        Some(Commands::Servers) => match load_merged_config(cli_config).await {
            Ok(config) => run_servers(config).await,
            Err(e) => config_failure(&presenter, e),
        },
        None => match load_merged_config(cli_config).await {
            Ok(config) => run_relay(config, cli.server).await,
            Err(e) => config_failure(&presenter, e),
        },
    }
}

fn config_failure(presenter: &Presenter, error: ConfigError) -> ExitCode {
    presenter.error(&error.to_string());
    match error {
        ConfigError::ValidationError { .. } => ExitCode::from(EXIT_USAGE_ERROR),
        _ => ExitCode::from(EXIT_ERROR),
    }
}
