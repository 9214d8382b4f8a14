use playshare::adapters::{FileSecureStore, ReqwestHttpClient};
use playshare::api::ApiClient;
use playshare::cli::{parse_args, run_cli_command, CliCommand};
use playshare::config::ClientConfig;
use playshare::session::SessionManager;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if command == CliCommand::Version {
        playshare::cli::handle_version_command();
        return Ok(());
    }

    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PLAYSHARE_LOG")
                .unwrap_or_else(|_| EnvFilter::new("playshare=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::debug!("Using backend {}", config.base_url);

    let store = match &config.store_path {
        Some(path) => FileSecureStore::at(path),
        None => FileSecureStore::new()?,
    };
    let http = ReqwestHttpClient::with_timeout(config.timeout.max(config.auth_timeout))?;
    let api = ApiClient::new(config, http, SessionManager::new(store));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_cli_command(command, &api))
}
