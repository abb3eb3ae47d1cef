//! poddle server entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use poddle_core::{TracingConfig, init_tracing};
use poddle_providers::eposnow::EposNowProvider;
use poddle_server::cli::{Cli, Command, ConfigAction};
use poddle_server::{EposNowService, HttpServer, ServerConfig, ServerResult, shutdown_signal};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::from_flags(cli.debug, cli.json_logs)) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServerResult<()> {
    if let Some(Command::Config {
        action: ConfigAction::Path,
    }) = cli.command
    {
        let path = cli.config.unwrap_or_else(ServerConfig::default_path);
        println!("config: {}", path.display());
        return Ok(());
    }

    let mut config = match cli.config {
        Some(ref path) => ServerConfig::load_from(path)?,
        None => ServerConfig::load()?,
    };

    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        port: None,
    }) {
        Command::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let provider = EposNowProvider::new(config.provider_config()?)?;
            let server = HttpServer::bind(&config.server, EposNowService::new(provider)).await?;
            server.run(shutdown_signal()).await
        }
        Command::AuthUrl { scopes } => {
            let provider = EposNowProvider::new(config.provider_config()?)?;
            println!("{}", provider.oauth().authorization_url(scopes.as_deref()));
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Path => Ok(()),
            ConfigAction::Validate => {
                config.provider_config()?;
                println!("Configuration is valid.");
                Ok(())
            }
        },
    }
}
