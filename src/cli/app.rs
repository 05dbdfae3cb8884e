//! Main app runner for relay sessions

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{AuthorizationError, ConfigStore, ServerDirectory};
use crate::application::{RelayCallbacks, RelayConfig, RelayError, RelaySession, RelaySummary};
use crate::domain::config::AppConfig;
use crate::domain::console::{ServerId, ServerSummary, UserCredential};
use crate::domain::error::ConfigError;
use crate::domain::session::SessionState;
use crate::infrastructure::{
    create_recognizer, AliasFileLoader, AliasLoadError, HttpConsoleConnector, LineInput,
    WebApiClient, XdgConfigStore,
};

use super::presenter::Presenter;
use super::signals::{interrupted, InterruptGuard};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variables consulted between the config file and CLI flags
pub const ENV_USERNAME: &str = "VOXRELAY_USERNAME";
pub const ENV_PASSWORD: &str = "VOXRELAY_PASSWORD";
pub const ENV_API_URL: &str = "VOXRELAY_API_URL";

const SERVER_PROMPT: &str = "Which server do you want to connect to?";

/// Errors from a CLI run
#[derive(Debug, Error)]
pub enum AppError {
    #[error(
        "Missing credentials. Set VOXRELAY_USERNAME and VOXRELAY_PASSWORD or run 'voxrelay config set username <name>' and 'voxrelay config set password <password>'"
    )]
    CredentialsMissing,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to list servers: {0}")]
    Directory(#[source] AuthorizationError),

    #[error(transparent)]
    Aliases(#[from] AliasLoadError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Run relay sessions: once for `server`, otherwise prompting in a loop
pub async fn run_relay(config: AppConfig, server: Option<ServerId>) -> ExitCode {
    let mut presenter = Presenter::new();

    let credential = match credential(&config) {
        Ok(credential) => credential,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let api = Arc::new(WebApiClient::new(
        config.api_url_or_default(),
        credential.clone(),
    ));
    let input = LineInput::from_stdin();

    if let Some(server) = server {
        return match run_session(&config, &credential, &api, &input, server).await {
            Ok(_) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    loop {
        let servers = match fetch_servers(&mut presenter, api.as_ref()).await {
            Ok(servers) => servers,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        };
        for summary in &servers {
            presenter.server(&summary.id.to_string(), &summary.name);
        }

        presenter.prompt(SERVER_PROMPT);
        let line = tokio::select! {
            line = input.next_line() => line,
            _ = interrupted() => {
                eprintln!();
                return ExitCode::from(EXIT_SUCCESS);
            }
        };

        let answer = match line {
            Ok(Some(answer)) => answer,
            Ok(None) => {
                eprintln!();
                return ExitCode::from(EXIT_SUCCESS);
            }
            Err(e) => {
                presenter.error(&format!("Failed to read input: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        };

        if answer.trim().is_empty() {
            continue;
        }

        let server = match answer.parse::<ServerId>() {
            Ok(server) => server,
            Err(e) => {
                presenter.warn(&e.to_string());
                continue;
            }
        };

        if let Err(e) = run_session(&config, &credential, &api, &input, server).await {
            presenter.error(&e.to_string());
        }
    }
}

/// List joined servers to stdout
pub async fn run_servers(config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let credential = match credential(&config) {
        Ok(credential) => credential,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let api = WebApiClient::new(config.api_url_or_default(), credential);
    match fetch_servers(&mut presenter, &api).await {
        Ok(servers) => {
            for summary in &servers {
                presenter.server(&summary.id.to_string(), &summary.name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn fetch_servers<D: ServerDirectory>(
    presenter: &mut Presenter,
    directory: &D,
) -> Result<Vec<ServerSummary>, AppError> {
    presenter.start_spinner("Fetching joined servers...");
    match directory.joined_servers().await {
        Ok(servers) => {
            presenter.spinner_success(&format!("{} joined server(s)", servers.len()));
            Ok(servers)
        }
        Err(e) => {
            presenter.spinner_fail("Could not fetch servers");
            Err(AppError::Directory(e))
        }
    }
}

/// One full session against `server`, building aliases and recognizer fresh
async fn run_session(
    config: &AppConfig,
    credential: &UserCredential,
    api: &Arc<WebApiClient>,
    input: &LineInput,
    server: ServerId,
) -> Result<RelaySummary, AppError> {
    let aliases = AliasFileLoader::new(config.alias_file.clone())
        .load(&credential.username)
        .await?;

    let relay_config = RelayConfig {
        aliases,
        override_confidence: config.override_confidence(),
        payload_format: config.payload_format(),
    };
    let recognizer = create_recognizer(config, input);
    let mut session = RelaySession::new(
        Arc::clone(api),
        HttpConsoleConnector::new(),
        recognizer,
        relay_config,
    );

    let _interrupt = InterruptGuard::stop_on_interrupt(session.stop_handle());
    let summary = session
        .connect_and_listen(server, callbacks(config.console_mode_or_default()))
        .await?;

    Presenter::new().info(&format!(
        "Session ended: {} command(s) relayed, {} rejected",
        summary.dispatched, summary.rejected
    ));
    Ok(summary)
}

fn callbacks(console_mode: bool) -> RelayCallbacks {
    RelayCallbacks {
        on_state_change: Some(Box::new(move |state| {
            let presenter = Presenter::new();
            match state {
                SessionState::Connecting => presenter.info("Requesting console access..."),
                SessionState::Listening if console_mode => {
                    presenter.success("Start typing, type quit to stop")
                }
                SessionState::Listening => presenter.success("Start speaking, say quit to stop"),
                _ => {}
            }
        })),
        on_dispatch: Some(Box::new(|raw, command| {
            Presenter::new().relayed(raw, command.payload());
        })),
        on_reject: Some(Box::new(|result, reason| {
            Presenter::new().warn(&format!("Ignored \"{}\": {}", result.text, reason));
        })),
    }
}

/// Operator credential from the merged config
pub fn credential(config: &AppConfig) -> Result<UserCredential, AppError> {
    match (config.username.as_deref(), config.password.as_deref()) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok(UserCredential::new(username, password))
        }
        _ => Err(AppError::CredentialsMissing),
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> Result<AppConfig, ConfigError> {
    let store = XdgConfigStore::new();
    let file_config = store.load().await?;

    let env_config = AppConfig {
        username: env_value(ENV_USERNAME),
        password: env_value(ENV_PASSWORD),
        api_url: env_value(ENV_API_URL),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_requires_both_fields() {
        let mut config = AppConfig {
            username: Some("operator".to_string()),
            ..Default::default()
        };
        assert!(matches!(credential(&config), Err(AppError::CredentialsMissing)));

        config.password = Some(String::new());
        assert!(matches!(credential(&config), Err(AppError::CredentialsMissing)));

        config.password = Some("hunter2".to_string());
        let credential = credential(&config).unwrap();
        assert_eq!(credential.username, "operator");
    }

    #[test]
    fn missing_credentials_message_names_env_vars() {
        let message = AppError::CredentialsMissing.to_string();
        assert!(message.contains(ENV_USERNAME));
        assert!(message.contains(ENV_PASSWORD));
    }
}
