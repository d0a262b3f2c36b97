use std::path::PathBuf;

use anyhow::Context;
use cinedex_server::{
    AppState,
    infra::{
        config::{Config, ConfigLoad, ConfigLoader, StoreBackend},
        store::{build_catalog, connect_postgres, open_store},
    },
    routes::create_app,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinedex-server")]
#[command(about = "Movie catalog HTTP service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CINEDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Connect to the configured store, print its diagnostics and exit
    Preflight,
    /// Apply PostgreSQL migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Preflight) => {
                run_db_preflight(&cli.serve).await?;
                return Ok(());
            }
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

async fn run_db_preflight(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let store = open_store(&config.store).await?;
    let diagnostics = build_catalog(store, &config)
        .diagnostics()
        .await
        .context("store preflight failed")?;
    info!(
        backend = diagnostics.backend,
        collection = %diagnostics.collection,
        documents = diagnostics.document_count,
        "Store preflight passed"
    );
    println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    Ok(())
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    if config.store.backend != StoreBackend::Postgres {
        anyhow::bail!(
            "migrations only apply to the postgres store (configured: {})",
            config.store.backend
        );
    }
    let store = connect_postgres(&config.store).await?;
    store.migrate().await.context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = args.env_file.clone() {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(&args)?;

    let store = open_store(&config.store).await?;
    let catalog = build_catalog(store, &config);
    let diagnostics = catalog
        .diagnostics()
        .await
        .context("store is unreachable at startup")?;
    info!(
        backend = diagnostics.backend,
        collection = %diagnostics.collection,
        documents = diagnostics.document_count,
        "catalog store ready"
    );

    let addr = config.server.socket_addr().await?;
    let state = AppState::new(catalog, config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Cinedex server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_db_subcommands() {
        let cli = Cli::try_parse_from(["cinedex-server", "db", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Db(DbCommand::Migrate))));
    }

    #[test]
    fn cli_accepts_serve_overrides() {
        let cli = Cli::try_parse_from([
            "cinedex-server",
            "--config",
            "cinedex.toml",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(9000));
        assert_eq!(cli.serve.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.serve.config, Some(PathBuf::from("cinedex.toml")));
    }
}
