//! # Shanny Server
//!
//! Contact form backend and site bootstrap API for shanny.tech.
//!
//! Configuration is layered from the environment, an optional
//! `shanny.toml` and built-in defaults; see `shanny-config`.

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shanny_config::{ConfigLoad, ConfigLoader, ConfigWarnings};
use shanny_server::{
    create_app,
    infra::startup::{ProdStartupHooks, StartupHooks, build_state},
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "shanny-server")]
#[command(about = "Contact form backend and site bootstrap API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to shanny.toml
    #[arg(long, env = "SHANNY_CONFIG")]
    config: Option<PathBuf>,

    /// Path to a .env file loaded before reading the environment
    #[arg(long, env = "SHANNY_ENV_FILE")]
    env_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate configuration, print warnings and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let load = load_config(&cli.serve)?;

    match cli.command {
        Some(Command::CheckConfig) => {
            report_warnings(&load.warnings);
            info!(
                config_path = ?load.config.metadata.config_path,
                bind = %load.config.server.bind_address(),
                "configuration is valid"
            );
            Ok(())
        }
        None => run_server(load).await,
    }
}

fn load_config(args: &ServeArgs) -> anyhow::Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let mut load = loader.load().context("failed to load configuration")?;
    if let Some(port) = args.port {
        load.config.server.port = port;
    }
    if let Some(host) = &args.host {
        load.config.server.host = host.clone();
    }
    Ok(load)
}

fn report_warnings(warnings: &ConfigWarnings) {
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
}

async fn run_server(load: ConfigLoad) -> anyhow::Result<()> {
    let ConfigLoad { config, warnings } = load;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    report_warnings(&warnings);

    let bind_address = config.server.bind_address();
    let state = build_state(config).await?;
    ProdStartupHooks.run(&state).await?;

    let router = create_app(state);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!("Server listening on http://{}", bind_address);

    let make_service =
        router.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, make_service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
