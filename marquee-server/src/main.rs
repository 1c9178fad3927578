use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, anyhow};
use clap::{Args as ClapArgs, Parser, Subcommand};
use marquee_core::{application::AppUnitOfWork, database::PostgresDatabase};
use marquee_server::{
    AppState,
    app::create_app,
    infra::config::{Config, ConfigLoad, ConfigLoader, ConfigWarnings},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "marquee-server")]
#[command(about = "Movie catalog API with threaded reviews and per-client ratings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Path to a marquee.toml configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                let config = load_runtime_config(&cli.serve)?;
                connect_and_migrate(&config).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
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
    log_warnings(&warnings);

    Ok(config)
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }
}

async fn connect_and_migrate(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let url = config
        .database
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("DATABASE_URL (or database.url) must be set"))?;
    let postgres = PostgresDatabase::connect(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    postgres
        .migrate()
        .await
        .context("failed to apply database migrations")?;
    Ok(postgres)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(&args)?;
    let postgres = Arc::new(connect_and_migrate(&config).await?);

    let unit_of_work = AppUnitOfWork::from_postgres(postgres)
        .map_err(|err| anyhow!("failed to build unit of work: {err}"))?;

    let bind_address = config.bind_address();
    let addr: SocketAddr = bind_address
        .parse()
        .with_context(|| format!("invalid bind address {bind_address}"))?;

    let state = AppState::new(unit_of_work, config);
    let router = create_app(state);

    info!("Starting Marquee catalog API on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
