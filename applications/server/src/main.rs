/// Melodia Server - album catalog HTTP API
use clap::{Parser, Subcommand};
use melodia_server::{api, config::ServerConfig, services::CoverStorage, state::AppState};
use melodia_storage::{AlbumRecordStore, MemoryCache, SqliteSongLookup};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melodia-server")]
#[command(about = "Melodia album catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MELODIA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create the database schema and exit
    Migrate,
    /// Print the effective configuration
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "melodia_server=info,melodia_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::Migrate => migrate(&config).await?,
        Commands::CheckConfig => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Melodia Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = melodia_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    melodia_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Like counts are cached in-process
    let cache = Arc::new(MemoryCache::new(
        config.cache.max_capacity,
        config.cache_ttl(),
    ));
    let songs = Arc::new(SqliteSongLookup::new(pool.clone()));
    let store = Arc::new(AlbumRecordStore::new(pool, songs, cache));

    // Initialize cover storage
    let covers = CoverStorage::new(
        config.storage.covers_path.clone(),
        config.public_url(),
        config.uploads.max_cover_bytes,
    );
    covers.initialize().await?;
    tracing::info!("Cover storage at {:?}", config.storage.covers_path);

    let app = api::create_router(AppState::new(store, Arc::new(covers)));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = melodia_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    melodia_storage::run_migrations(&pool).await?;
    tracing::info!("Schema is up to date");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
